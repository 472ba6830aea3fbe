//! 外部翻译组件适配层
//!
//! 调度器只认识两个操作：写入原文、读取当前译文。组件是单槽位资源，
//! 同一时刻只持有一对输入/输出，没有内部排队。具体是哪种组件在每次运行开始时
//! 通过 [`AdapterProfile`] 选定一次。

use std::path::PathBuf;

use thiserror::Error;

pub mod command;
pub mod file_slot;

pub use command::CommandAdapter;
pub use file_slot::FileSlotAdapter;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("输入槽不可用: {0}")]
    InputUnavailable(String),
    #[error("输出槽不可用: {0}")]
    OutputUnavailable(String),
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 外部翻译组件的最小契约
pub trait WidgetAdapter {
    /// 把文本放入组件的原文槽，并通知宿主该槽已变化
    fn write_input(&mut self, text: &str) -> Result<(), AdapterError>;

    /// 读取组件当前的译文；不保证与最近一次写入对应
    fn read_output(&mut self) -> Result<String, AdapterError>;

    fn name(&self) -> &str;
}

impl<A: WidgetAdapter + ?Sized> WidgetAdapter for Box<A> {
    fn write_input(&mut self, text: &str) -> Result<(), AdapterError> {
        (**self).write_input(text)
    }

    fn read_output(&mut self) -> Result<String, AdapterError> {
        (**self).read_output()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// 译文的呈现方式：可编辑字段的值，或渲染后的文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSurface {
    #[default]
    FieldValue,
    RenderedText,
}

impl OutputSurface {
    /// 两种呈现对调度器语义相同，只是渲染文本会去掉尾部空白
    pub fn present(self, raw: String) -> String {
        match self {
            Self::FieldValue => raw,
            Self::RenderedText => {
                let trimmed = raw.trim_end();
                if trimmed.len() == raw.len() {
                    raw
                } else {
                    trimmed.to_string()
                }
            }
        }
    }
}

/// 每次运行选定一次的组件配置
#[derive(Debug, Clone)]
pub enum AdapterProfile {
    /// 每次写入启动一次外部命令，stdin 为原文，stdout 为译文
    Command { command: String, surface: OutputSurface },
    /// 通过一对文件与外部程序交换原文/译文
    FileSlot {
        input: PathBuf,
        output: PathBuf,
        surface: OutputSurface,
    },
}

/// 按配置打开适配器
pub fn open_adapter(profile: AdapterProfile) -> Result<Box<dyn WidgetAdapter>, AdapterError> {
    let adapter: Box<dyn WidgetAdapter> = match profile {
        AdapterProfile::Command { command, surface } => Box::new(CommandAdapter::new(command, surface)?),
        AdapterProfile::FileSlot { input, output, surface } => {
            Box::new(FileSlotAdapter::open(input, output, surface)?)
        }
    };
    tracing::info!("已选定翻译组件: {}", adapter.name());
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_is_verbatim() {
        assert_eq!(OutputSurface::FieldValue.present("hola\n".into()), "hola\n");
    }

    #[test]
    fn test_rendered_text_trims_trailing_whitespace() {
        assert_eq!(OutputSurface::RenderedText.present("  hola \n".into()), "  hola");
        assert_eq!(OutputSurface::RenderedText.present("hola".into()), "hola");
    }

    #[test]
    fn test_open_rejects_empty_command() {
        let result = open_adapter(AdapterProfile::Command {
            command: "   ".into(),
            surface: OutputSurface::RenderedText,
        });
        assert!(matches!(result, Err(AdapterError::InputUnavailable(_))));
    }

    #[test]
    fn test_open_rejects_missing_slot_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_adapter(AdapterProfile::FileSlot {
            input: dir.path().join("missing").join("in.txt"),
            output: dir.path().join("out.txt"),
            surface: OutputSurface::FieldValue,
        });
        assert!(matches!(result, Err(AdapterError::InputUnavailable(_))));
    }
}
