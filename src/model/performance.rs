//! 运行报告：记录每一步的耗时与疑似时序竞争，使固定延迟的风险可观测

use std::time::Duration;

use serde::Serialize;

/// 单步记录
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub path: String,
    pub input_chars: usize,
    pub output_chars: usize,
    pub duration_ms: u128,
    /// 组件未被访问（非字符串直通）
    pub skipped: bool,
    /// 输出为空或与上一步相同：延迟可能不足
    pub suspected_race: bool,
}

/// 一次翻译运行的汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub delay_ms: u64,
    pub buffer_ms: u64,
    pub total_leaves: usize,
    pub steps: Vec<StepRecord>,
    pub total_ms: u128,
}

impl RunReport {
    pub fn new(delay_ms: u64, buffer_ms: u64, total_leaves: usize) -> Self {
        Self {
            delay_ms,
            buffer_ms,
            total_leaves,
            steps: Vec::with_capacity(total_leaves),
            total_ms: 0,
        }
    }

    pub fn record(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    pub fn finish(&mut self, total: Duration) {
        self.total_ms = total.as_millis();
    }

    pub fn suspected_races(&self) -> usize {
        self.steps.iter().filter(|s| s.suspected_race).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps.iter().filter(|s| s.skipped).count()
    }

    /// 一行摘要，用于日志
    pub fn summary(&self) -> String {
        format!(
            "共 {} 个叶子，完成 {} 步（直通 {}），疑似延迟不足 {} 步，总耗时 {}ms",
            self.total_leaves,
            self.steps.len(),
            self.skipped(),
            self.suspected_races(),
            self.total_ms
        )
    }
}

/// 判断某一步的捕获结果是否可疑
///
/// 固定延迟没有完成信号：输出为空（输入非空），或输入变了而输出仍是上一步的值，
/// 都说明外部组件可能还没有给出本次的翻译。
pub fn looks_stale(input: &str, output: &str, previous: Option<(&str, &str)>) -> bool {
    if output.trim().is_empty() && !input.trim().is_empty() {
        return true;
    }
    match previous {
        Some((prev_input, prev_output)) => prev_input != input && prev_output == output,
        None => false,
    }
}
