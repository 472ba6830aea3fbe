//! 叶子条目：键路径 + 标量值，是展平与重建之间唯一的交换格式

use std::fmt;

use serde_json::{Number, Value};

/// 键路径分隔符（序列化形式）
pub const PATH_SEPARATOR: char = '.';

/// 叶子在原始树中的位置：对象键名或数组下标的字符串形式
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// 根路径（无任何段）
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// 在当前路径后追加一段，返回新路径
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Self(segments)
    }

    /// 从 `.` 连接的序列化形式解析；空串即根路径
    pub fn parse(serialized: &str) -> Self {
        if serialized.is_empty() {
            return Self::root();
        }
        Self(serialized.split(PATH_SEPARATOR).map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

/// 叶子值：只有标量会成为叶子，对象与数组总是继续向下遍历
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// 标量视图；对象与数组返回 None
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Object(_) | Value::Array(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }

    /// 写入翻译组件输入框的文本：null 写为空串
    pub fn as_input_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// 单个叶子：路径 + 标量值
#[derive(Debug, Clone, PartialEq)]
pub struct LeafEntry {
    pub path: KeyPath,
    pub value: Scalar,
}

impl LeafEntry {
    pub fn new(path: KeyPath, value: impl Into<Scalar>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// 深度优先、先序遍历得到的叶子序列；一次运行中不可变
pub type FlatSequence = Vec<LeafEntry>;
