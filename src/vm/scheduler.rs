//! 翻译调度器：把叶子序列逐条送入单槽位翻译组件，收集译文并重建 JSON
//!
//! 状态机：Idle → Validating → Running{index} → Completed，校验失败进入 Failed。
//! 每一步严格串行：写入原文 → 等待设定延迟 → 读取译文 → 步间缓冲 → 下一步写入。
//! 没有完成信号，外部组件慢于延迟时会读到空值或上一步的译文，
//! 这类情况只记录告警并标注在运行报告中，不做重试。

use std::time::Duration;

use crate::adapter::WidgetAdapter;
use crate::model::data_core::{parse_input, render_output, AppError};
use crate::model::flatten::flatten;
use crate::model::leaf::{FlatSequence, LeafEntry, Scalar};
use crate::model::performance::{looks_stale, RunReport, StepRecord};
use crate::model::reconstruct::reconstruct;
use crate::vm::bridge::*;
use crate::vm::clock::Clock;

pub const DEFAULT_DELAY_MS: u64 = 2000;
pub const DEFAULT_BUFFER_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// 写入后等待译文的时间（毫秒）
    pub delay_ms: u64,
    /// 读取后到下一次写入之间的缓冲（毫秒）
    pub buffer_ms: u64,
    /// 数字、布尔、null 原样保留，不经过翻译组件
    pub skip_non_strings: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            buffer_ms: DEFAULT_BUFFER_MS,
            skip_non_strings: false,
        }
    }
}

impl SchedulerConfig {
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::default()
        }
    }

    /// 宽松解析用户填写的延迟；无法解析为非负整数时回退默认值
    pub fn from_delay_input(text: &str) -> Self {
        match parse_delay(text) {
            Some(delay_ms) => Self::with_delay(delay_ms),
            None => {
                tracing::warn!("延迟 `{}` 无法解析，使用默认值 {}ms", text, DEFAULT_DELAY_MS);
                Self::default()
            }
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// 相邻两次写入的间隔
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.delay_ms.saturating_add(self.buffer_ms))
    }

    pub fn step_buffer(&self) -> Duration {
        self.tick_interval().saturating_sub(self.settle_delay())
    }
}

/// 取开头的十进制数字，允许前导空白与 `+`
pub fn parse_delay(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Running { index: usize },
    Completed,
    Failed,
}

pub struct TranslationScheduler<A: WidgetAdapter, C: Clock> {
    adapter: A,
    clock: C,
    config: SchedulerConfig,
    state: RunState,
    flat: FlatSequence,
    results: Vec<LeafEntry>,
    output: Option<String>,
    progress: Progress,
    report: RunReport,
    started_at: Duration,
    /// 上一次与组件交换的（原文, 译文），用于识别过期读取
    last_exchange: Option<(String, String)>,
    listener: Option<Box<dyn FnMut(Progress)>>,
}

impl<A: WidgetAdapter, C: Clock> TranslationScheduler<A, C> {
    pub fn new(adapter: A, clock: C, config: SchedulerConfig) -> Self {
        Self {
            adapter,
            clock,
            config,
            state: RunState::Idle,
            flat: Vec::new(),
            results: Vec::new(),
            output: None,
            progress: Progress::new(0, 0),
            report: RunReport::default(),
            started_at: Duration::ZERO,
            last_exchange: None,
            listener: None,
        }
    }

    /// 注册进度回调；每完成一步调用一次
    pub fn on_progress(&mut self, listener: impl FnMut(Progress) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// 校验输入并进入 Running；校验失败进入 Failed，输出替换为提示文本
    pub fn start(&mut self, raw: &str) -> Result<(), AppError> {
        if let RunState::Running { .. } = self.state {
            return Err(AppError::State("已有翻译任务在运行，无法重复开始".into()));
        }
        self.discard_run();
        self.output = None;

        self.state = RunState::Validating;
        tracing::info!("{}", STATUS_VALIDATING);
        let value = match parse_input(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}{}", STATUS_ERROR_PREFIX, e);
                self.state = RunState::Failed;
                self.output = Some(INVALID_JSON_MESSAGE.to_string());
                return Err(e);
            }
        };

        self.flat = flatten(&value);
        let total = self.flat.len();
        self.results = Vec::with_capacity(total);
        self.report = RunReport::new(self.config.delay_ms, self.config.buffer_ms, total);
        self.started_at = self.clock.now();
        self.state = RunState::Running { index: 0 };
        tracing::info!(
            "{} 共 {} 个叶子，延迟 {}ms，间隔 {}ms",
            STATUS_RUNNING,
            total,
            self.config.delay_ms,
            self.config.tick_interval().as_millis()
        );
        self.emit(Progress::new(0, total));

        if total == 0 {
            self.complete()?;
        }
        Ok(())
    }

    /// 推进一步：写入、等待、读取、记录；返回推进后的状态
    pub fn step(&mut self) -> Result<RunState, AppError> {
        let index = match self.state {
            RunState::Running { index } => index,
            ref other => return Err(AppError::State(format!("当前状态 {:?} 无法推进", other))),
        };
        let total = self.flat.len();
        let LeafEntry { path, value } = self.flat[index].clone();
        let step_start = self.clock.now();

        let touched_widget = !(self.config.skip_non_strings && !value.is_string());
        let (captured, suspected_race, input_chars) = if touched_widget {
            let input = value.as_input_text();
            let captured = match self.exchange(&input) {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("翻译在第 {}/{} 步（{}）中断: {}", index + 1, total, path, e);
                    self.discard_run();
                    return Err(e);
                }
            };
            let previous = self.last_exchange.as_ref().map(|(i, o)| (i.as_str(), o.as_str()));
            let suspected = looks_stale(&input, &captured, previous);
            if suspected {
                tracing::warn!(
                    "第 {}/{} 步（{}）的译文可疑，延迟 {}ms 可能不足",
                    index + 1,
                    total,
                    path,
                    self.config.delay_ms
                );
            }
            let input_chars = input.chars().count();
            self.last_exchange = Some((input, captured.clone()));
            (Scalar::String(captured), suspected, input_chars)
        } else {
            (value, false, 0)
        };

        tracing::debug!("第 {}/{} 步完成: {}", index + 1, total, path);
        self.report.record(StepRecord {
            index,
            path: path.to_string(),
            input_chars,
            output_chars: captured.as_input_text().chars().count(),
            duration_ms: self.clock.now().saturating_sub(step_start).as_millis(),
            skipped: !touched_widget,
            suspected_race,
        });
        self.results.push(LeafEntry { path, value: captured });

        let next = index + 1;
        self.emit(Progress::new(next, total));
        if next == total {
            self.complete()?;
        } else {
            self.state = RunState::Running { index: next };
            if touched_widget {
                self.clock.sleep(self.config.step_buffer());
            }
        }
        Ok(self.state.clone())
    }

    /// 完整执行一次运行，返回输出文本
    pub fn run(&mut self, raw: &str) -> Result<String, AppError> {
        self.start(raw)?;
        while let RunState::Running { .. } = self.state {
            self.step()?;
        }
        self.output
            .clone()
            .ok_or_else(|| AppError::State("运行结束但没有输出".into()))
    }

    /// 停止后续步骤并丢弃部分结果；仅在 Running 时生效
    pub fn cancel(&mut self) -> bool {
        if let RunState::Running { index } = self.state {
            tracing::info!("{}（已完成 {}/{} 步）", STATUS_CANCELLED, index, self.flat.len());
            self.discard_run();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// 完成时为格式化的 JSON，校验失败时为提示文本
    pub fn output_text(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn flat(&self) -> &[LeafEntry] {
        &self.flat
    }

    pub fn results(&self) -> &[LeafEntry] {
        &self.results
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    fn exchange(&mut self, input: &str) -> Result<String, AppError> {
        self.adapter.write_input(input)?;
        self.clock.sleep(self.config.settle_delay());
        Ok(self.adapter.read_output()?)
    }

    fn complete(&mut self) -> Result<(), AppError> {
        let rebuilt = reconstruct(&self.results);
        let text = render_output(&rebuilt)?;
        self.report
            .finish(self.clock.now().saturating_sub(self.started_at));
        tracing::info!("{}：{}", STATUS_COMPLETED, self.report.summary());
        self.output = Some(text);
        self.state = RunState::Completed;
        Ok(())
    }

    fn discard_run(&mut self) {
        self.flat.clear();
        self.results.clear();
        self.last_exchange = None;
        self.state = RunState::Idle;
    }

    fn emit(&mut self, progress: Progress) {
        self.progress = progress;
        if let Some(listener) = self.listener.as_mut() {
            listener(progress);
        }
    }
}
