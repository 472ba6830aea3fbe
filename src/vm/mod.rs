//! 驱动层：调度器、时钟与对外共享的状态常量

pub mod bridge;
pub mod clock;
pub mod scheduler;
