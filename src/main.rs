//! 程序入口：初始化日志、解析命令行、选定翻译组件并执行一次翻译运行

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::fmt::SubscriberBuilder;

use json_fanyi::utils::fs::{read_input_text, write_output_text};
use json_fanyi::vm::bridge::*;
use json_fanyi::{open_adapter, AdapterProfile, OutputSurface, SchedulerConfig, SystemClock, TranslationScheduler};

/// 只翻译JSON中的字符串值，保持键结构不变
#[derive(Parser, Debug)]
#[command(name = "json_fanyi", version, about, long_about = None)]
struct Cli {
    /// 输入JSON文件（`-` 表示标准输入）
    #[arg(short, long, default_value = "-")]
    input: String,

    /// 输出文件（省略则写到标准输出）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 写入后等待译文的延迟（毫秒）；无法解析时使用 2000
    #[arg(short, long, default_value = "2000")]
    delay: String,

    /// 翻译组件类型
    #[arg(long, value_enum, default_value_t = AdapterKind::Command)]
    adapter: AdapterKind,

    /// command 组件：原文经 stdin 传入、译文从 stdout 读取的 shell 命令
    #[arg(long, required_if_eq("adapter", "command"))]
    command: Option<String>,

    /// file 组件：原文槽文件
    #[arg(long, required_if_eq("adapter", "file"))]
    input_slot: Option<PathBuf>,

    /// file 组件：译文槽文件
    #[arg(long, required_if_eq("adapter", "file"))]
    output_slot: Option<PathBuf>,

    /// 译文呈现方式（默认：command 为 text，file 为 value）
    #[arg(long, value_enum)]
    surface: Option<SurfaceArg>,

    /// 数字、布尔、null 原样保留，不送去翻译
    #[arg(long)]
    skip_non_strings: bool,

    /// 完成后复制结果到剪贴板
    #[arg(long)]
    copy: bool,

    /// 写出JSON格式的运行报告
    #[arg(long)]
    report: Option<PathBuf>,

    /// 只输出告警与错误日志
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AdapterKind {
    /// 每条原文启动一次外部命令
    Command,
    /// 通过一对文件与外部程序交换
    File,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SurfaceArg {
    /// 原样读取字段值
    Value,
    /// 按渲染文本读取（去掉尾部空白）
    Text,
}

impl From<SurfaceArg> for OutputSurface {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Value => OutputSurface::FieldValue,
            SurfaceArg::Text => OutputSurface::RenderedText,
        }
    }
}

impl Cli {
    fn profile(&self) -> Result<AdapterProfile> {
        let profile = match self.adapter {
            AdapterKind::Command => AdapterProfile::Command {
                command: self.command.clone().context("缺少 --command")?,
                surface: self.surface.map(Into::into).unwrap_or(OutputSurface::RenderedText),
            },
            AdapterKind::File => AdapterProfile::FileSlot {
                input: self.input_slot.clone().context("缺少 --input-slot")?,
                output: self.output_slot.clone().context("缺少 --output-slot")?,
                surface: self.surface.map(Into::into).unwrap_or(OutputSurface::FieldValue),
            },
        };
        Ok(profile)
    }

    fn emit(&self, text: &str) -> Result<()> {
        match self.output.as_ref() {
            Some(path) => write_output_text(path, text)
                .with_context(|| format!("写出结果失败: {}", path.display()))?,
            None => println!("{text}"),
        }
        Ok(())
    }

    /// 结果JSON同时放到剪贴板；失败只告警，不影响已写出的结果
    fn emit_to_clipboard(&self, text: &str) {
        use copypasta::{ClipboardContext, ClipboardProvider};

        if !self.copy {
            return;
        }
        let copied = ClipboardContext::new().and_then(|mut ctx| ctx.set_contents(text.to_string()));
        match copied {
            Ok(()) => tracing::info!("已复制 {} 个字符到剪贴板", text.chars().count()),
            Err(e) => tracing::warn!("{}剪贴板不可用: {}", STATUS_ERROR_PREFIX, e),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志输出；写到 stderr，stdout 只留给结果JSON
    let level = if cli.quiet { tracing::Level::WARN } else { tracing::Level::INFO };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::info!("{}", STATUS_READY);

    let raw = read_input_text(&cli.input).with_context(|| format!("读取输入失败: {}", cli.input))?;
    let mut config = SchedulerConfig::from_delay_input(&cli.delay);
    config.skip_non_strings = cli.skip_non_strings;

    let adapter = open_adapter(cli.profile()?).context("打开翻译组件失败")?;
    let mut scheduler = TranslationScheduler::new(adapter, SystemClock::new(), config);
    scheduler.on_progress(|p| {
        tracing::info!("进度: {:.0}% ({}/{})", p.percent(), p.completed, p.total);
    });

    match scheduler.run(&raw) {
        Ok(text) => {
            cli.emit(&text)?;
            cli.emit_to_clipboard(&text);
        }
        Err(e) if e.is_validation() => {
            let message = scheduler.output_text().unwrap_or(INVALID_JSON_MESSAGE).to_string();
            cli.emit(&message)?;
            bail!("{}", e);
        }
        Err(e) => return Err(e).context("翻译运行中断"),
    }

    if let Some(path) = cli.report.as_ref() {
        let report = serde_json::to_string_pretty(scheduler.report())?;
        write_output_text(path, &report).with_context(|| format!("写出报告失败: {}", path.display()))?;
    }
    Ok(())
}
