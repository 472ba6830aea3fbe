//! 时钟抽象：调度器的两个挂起点（等待译文、步间缓冲）都经由这里

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// 自时钟创建以来经过的时间
    fn now(&self) -> Duration;

    /// 单纯按时间等待，不观察外部组件是否就绪
    fn sleep(&self, duration: Duration);
}

/// 真实时钟
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[derive(Debug, Default)]
struct ManualState {
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

/// 虚拟时钟：sleep 立即返回并推进虚拟时间；克隆体共享同一时间线
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ManualState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 不经 sleep 直接推进时间（模拟外部事件）
    pub fn advance(&self, duration: Duration) {
        self.state.borrow_mut().elapsed += duration;
    }

    /// 按顺序记录的全部等待
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.state.borrow().elapsed
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.state.borrow_mut();
        state.elapsed += duration;
        state.sleeps.push(duration);
    }
}
