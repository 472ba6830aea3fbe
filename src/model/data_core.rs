//! 核心数据入口与出口：输入校验、输出格式化、统一错误类型

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

use crate::adapter::AdapterError;

/// 输出 JSON 的缩进（单个空格）
pub const OUTPUT_INDENT: &[u8] = b" ";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON处理失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSON校验失败: {0}")]
    Validation(#[source] serde_json::Error),
    #[error("翻译组件不可用: {0}")]
    Adapter(#[from] AdapterError),
    #[error("状态错误: {0}")]
    State(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// 校验用户输入的 JSON 文本；任何调度开始之前调用
pub fn parse_input(raw: &str) -> Result<Value, AppError> {
    serde_json::from_str::<Value>(raw).map_err(AppError::Validation)
}

/// 以单空格缩进格式化输出，键保持原顺序
pub fn render_output(value: &Value) -> Result<String, AppError> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(OUTPUT_INDENT));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| AppError::State(format!("输出不是合法UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_input() {
        let v = parse_input(r#"{"greeting":"hello"}"#).unwrap();
        assert_eq!(v, json!({"greeting": "hello"}));
    }

    #[test]
    fn test_parse_invalid_input() {
        let err = parse_input("{bad json").unwrap_err();
        assert!(err.is_validation(), "非法JSON应该返回校验错误");
    }

    #[test]
    fn test_parse_top_level_scalar() {
        assert_eq!(parse_input("42").unwrap(), json!(42));
    }

    #[test]
    fn test_render_one_space_indent() {
        let text = render_output(&json!({"greeting": "hola", "nested": {"farewell": "adiós"}})).unwrap();
        assert_eq!(
            text,
            "{\n \"greeting\": \"hola\",\n \"nested\": {\n  \"farewell\": \"adiós\"\n }\n}"
        );
    }

    #[test]
    fn test_render_empty_object() {
        assert_eq!(render_output(&json!({})).unwrap(), "{}");
    }
}
