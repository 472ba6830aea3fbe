//! 展平：把任意 JSON 树拆成有序叶子序列（深度优先、先序、按容器自身的枚举顺序）

use serde_json::Value;

use crate::model::leaf::{FlatSequence, KeyPath, LeafEntry, Scalar};

/// 从根 Value 生成叶子序列
///
/// 空对象、空数组不产生任何叶子，其键在往返中会丢失。
/// 顶层标量产生一个根路径叶子。
pub fn flatten(root: &Value) -> FlatSequence {
    let mut out = Vec::with_capacity(64);
    fn walk(out: &mut FlatSequence, v: &Value, path: KeyPath) {
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    walk(out, child, path.child(k.as_str()));
                }
            }
            Value::Array(arr) => {
                for (idx, child) in arr.iter().enumerate() {
                    walk(out, child, path.child(idx.to_string()));
                }
            }
            scalar => {
                if let Some(value) = Scalar::from_value(scalar) {
                    out.push(LeafEntry { path, value });
                }
            }
        }
    }

    walk(&mut out, root, KeyPath::root());
    tracing::debug!("flatten: 生成 {} 个叶子", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(flat: &FlatSequence) -> Vec<String> {
        flat.iter().map(|e| e.path.to_string()).collect()
    }

    #[test]
    fn test_greeting_scenario() {
        let json = json!({"greeting": "hello", "nested": {"farewell": "bye"}});
        let flat = flatten(&json);

        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0], LeafEntry::new(KeyPath::parse("greeting"), "hello"));
        assert_eq!(flat[1], LeafEntry::new(KeyPath::parse("nested.farewell"), "bye"));
    }

    #[test]
    fn test_preorder_follows_source_key_order() {
        // preserve_order 下对象按插入顺序枚举，而非字母序
        let json: Value = serde_json::from_str(
            r#"{"z": "1", "a": {"y": "2", "b": "3"}, "m": ["4", {"k": "5"}]}"#,
        )
        .unwrap();
        let flat = flatten(&json);

        assert_eq!(paths(&flat), ["z", "a.y", "a.b", "m.0", "m.1.k"]);
    }

    #[test]
    fn test_empty_containers_leave_no_trace() {
        let json = json!({"a": {}, "b": "x", "c": []});
        let flat = flatten(&json);

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0], LeafEntry::new(KeyPath::parse("b"), "x"));
    }

    #[test]
    fn test_all_scalar_kinds_become_leaves() {
        let json = json!({"s": "文本", "n": 42, "b": true, "z": null});
        let flat = flatten(&json);

        let values: Vec<&Scalar> = flat.iter().map(|e| &e.value).collect();
        assert_eq!(values[0], &Scalar::from("文本"));
        assert_eq!(values[1], &Scalar::Number(42u64.into()));
        assert_eq!(values[2], &Scalar::Bool(true));
        assert_eq!(values[3], &Scalar::Null);
    }

    #[test]
    fn test_top_level_scalar_has_root_path() {
        let flat = flatten(&json!("hello"));
        assert_eq!(flat.len(), 1);
        assert!(flat[0].path.is_root());
    }

    #[test]
    fn test_top_level_array() {
        let flat = flatten(&json!(["a", ["b", "c"]]));
        assert_eq!(paths(&flat), ["0", "1.0", "1.1"]);
    }

    #[test]
    fn test_paths_are_unique() {
        let json = json!({
            "items": ["第一项", {"id": 1}, [1, 2, 3]],
            "meta": {"items": {"0": "x"}}
        });
        let flat = flatten(&json);

        let mut seen = std::collections::HashSet::new();
        for entry in &flat {
            assert!(seen.insert(entry.path.clone()), "路径重复: {}", entry.path);
        }
    }
}
