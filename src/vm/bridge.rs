//! VM桥接层：调度器与外部呈现（CLI、日志）之间共享的常量与进度类型

// === 常量定义（消除魔法值） ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_VALIDATING: &str = "正在校验JSON...";
pub const STATUS_RUNNING: &str = "正在逐条翻译...";
pub const STATUS_COMPLETED: &str = "翻译完成";
pub const STATUS_CANCELLED: &str = "已取消";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// 输入JSON无效时替代输出的提示文本（固定英文文案，不随日志本地化）
pub const INVALID_JSON_MESSAGE: &str = "Please check your JSON, it appears to be invalid";

/// 已完成步数 / 总步数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// 0.0 ..= 1.0；没有叶子时视为已完成
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        assert_eq!(Progress::new(0, 4).fraction(), 0.0);
        assert_eq!(Progress::new(1, 4).percent(), 25.0);
        assert_eq!(Progress::new(4, 4).percent(), 100.0);
        assert_eq!(Progress::new(0, 0).fraction(), 1.0);
    }
}
