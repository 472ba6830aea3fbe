//! IO helper: 读取输入JSON文本、写出结果文本

use std::io::{self, Read};
use std::path::Path;

use crate::model::data_core::AppError;

/// 标准输入的占位路径
pub const STDIN_MARKER: &str = "-";

/// 读取输入文本；`-` 表示标准输入。只读原文，校验交给调度器
pub fn read_input_text(source: &str) -> Result<String, AppError> {
    if source == STDIN_MARKER {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(Path::new(source))?)
}

/// 写出结果文本，必要时创建父目录
pub fn write_output_text(p: &Path, text: &str) -> Result<(), AppError> {
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(p, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_read_input_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(r#"{"greeting":"hello"}"#.as_bytes()).unwrap();

        let text = read_input_text(file.path().to_str().unwrap()).unwrap();
        assert_eq!(text, r#"{"greeting":"hello"}"#);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let result = read_input_text(missing.to_str().unwrap());
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out").join("translated.json");

        write_output_text(&target, "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");
    }
}
