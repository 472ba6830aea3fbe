//! JSON翻译工具库
//!
//! 只翻译JSON中的字符串值并保持键结构：展平为有序叶子序列，
//! 逐条经外部翻译组件处理，再按路径重建输出

pub mod adapter;
pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use adapter::{open_adapter, AdapterError, AdapterProfile, OutputSurface, WidgetAdapter};
pub use model::data_core::{parse_input, render_output, AppError};
pub use model::flatten::flatten;
pub use model::leaf::{FlatSequence, KeyPath, LeafEntry, Scalar};
pub use model::reconstruct::reconstruct;
pub use vm::bridge::{Progress, INVALID_JSON_MESSAGE};
pub use vm::clock::{Clock, ManualClock, SystemClock};
pub use vm::scheduler::{RunState, SchedulerConfig, TranslationScheduler};
