//! 文件槽适配器：一对文件充当原文框与译文框，由外部程序监视并回填

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::adapter::{AdapterError, OutputSurface, WidgetAdapter};

pub struct FileSlotAdapter {
    input: PathBuf,
    output: PathBuf,
    surface: OutputSurface,
    label: String,
}

impl FileSlotAdapter {
    /// 打开文件槽；两个槽所在目录必须存在
    pub fn open(input: PathBuf, output: PathBuf, surface: OutputSurface) -> Result<Self, AdapterError> {
        ensure_parent(&input).map_err(AdapterError::InputUnavailable)?;
        ensure_parent(&output).map_err(AdapterError::OutputUnavailable)?;
        Ok(Self {
            label: format!("file({} -> {})", input.display(), output.display()),
            input,
            output,
            surface,
        })
    }
}

fn ensure_parent(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(format!("目录不存在: {}", dir.display()))
        }
        _ => Ok(()),
    }
}

impl WidgetAdapter for FileSlotAdapter {
    fn write_input(&mut self, text: &str) -> Result<(), AdapterError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.input)
            .map_err(|e| AdapterError::InputUnavailable(format!("{}: {}", self.input.display(), e)))?;
        file.write_all(text.as_bytes())?;
        // 落盘后修改时间即为变更通知
        file.sync_all()?;
        Ok(())
    }

    fn read_output(&mut self) -> Result<String, AdapterError> {
        match fs::read_to_string(&self.output) {
            Ok(raw) => Ok(self.surface.present(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AdapterError::OutputUnavailable(format!(
                "{} 不存在",
                self.output.display()
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}
