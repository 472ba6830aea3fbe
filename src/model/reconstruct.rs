//! 重建：按叶子序列逐条回填，得到以对象为根的 JSON 树

use serde_json::{Map, Value};

use crate::model::leaf::LeafEntry;

/// 由叶子序列重建 JSON
///
/// - 根节点总是对象，数组下标段也作为字符串键保留，不会还原为数组
/// - 每段先到先得：已赋值的段不会被后续条目覆盖或穿透
/// - 根路径条目写入键 `""`
pub fn reconstruct(entries: &[LeafEntry]) -> Value {
    let mut root = Map::new();
    let mut dropped = 0usize;
    for entry in entries {
        if !place(&mut root, entry) {
            dropped += 1;
            tracing::debug!("reconstruct: 丢弃冲突条目 {}", entry.path);
        }
    }
    if dropped > 0 {
        tracing::warn!("reconstruct: {} 个条目因路径冲突被丢弃", dropped);
    }
    Value::Object(root)
}

/// 沿路径创建中间对象并在末段赋值；返回是否写入
fn place(root: &mut Map<String, Value>, entry: &LeafEntry) -> bool {
    let root_segment = [String::new()];
    let segments = if entry.path.is_root() {
        &root_segment[..]
    } else {
        entry.path.segments()
    };
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut cursor = root;
    for segment in parents {
        let slot = cursor
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        match slot {
            Value::Object(map) => cursor = map,
            // 该段已是标量，不能再向下
            _ => return false,
        }
    }

    if cursor.contains_key(last) {
        return false;
    }
    cursor.insert(last.clone(), entry.value.to_value());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::flatten::flatten;
    use crate::model::leaf::KeyPath;
    use serde_json::json;

    fn entry(path: &str, value: &str) -> LeafEntry {
        LeafEntry::new(KeyPath::parse(path), value)
    }

    #[test]
    fn test_greeting_scenario_with_translations() {
        let results = vec![entry("greeting", "hola"), entry("nested.farewell", "adiós")];
        let rebuilt = reconstruct(&results);

        assert_eq!(rebuilt, json!({"greeting": "hola", "nested": {"farewell": "adiós"}}));
    }

    #[test]
    fn test_round_trip_objects_and_scalars() {
        let json = json!({
            "title": "标题",
            "count": 3,
            "enabled": false,
            "nothing": null,
            "user": {"profile": {"name": "张三", "age": 30}},
            "key.with.dots": "保留"
        });

        assert_eq!(reconstruct(&flatten(&json)), json);
    }

    #[test]
    fn test_round_trip_preserves_key_order() {
        let src = r#"{"z":"1","a":{"y":"2","b":"3"}}"#;
        let json: Value = serde_json::from_str(src).unwrap();
        let rebuilt = reconstruct(&flatten(&json));

        assert_eq!(serde_json::to_string(&rebuilt).unwrap(), src);
    }

    #[test]
    fn test_arrays_become_index_keyed_objects() {
        let json = json!({"list": ["a", "b", {"c": "d"}], "grid": [["x"]]});
        let rebuilt = reconstruct(&flatten(&json));

        assert_eq!(
            rebuilt,
            json!({
                "list": {"0": "a", "1": "b", "2": {"c": "d"}},
                "grid": {"0": {"0": "x"}}
            })
        );
    }

    #[test]
    fn test_top_level_array_becomes_object() {
        let rebuilt = reconstruct(&flatten(&json!(["a", "b"])));
        assert_eq!(rebuilt, json!({"0": "a", "1": "b"}));
    }

    #[test]
    fn test_empty_container_key_is_lost() {
        let json = json!({"a": {}, "b": "x"});
        let rebuilt = reconstruct(&flatten(&json));

        assert_eq!(rebuilt, json!({"b": "x"}));
    }

    #[test]
    fn test_first_writer_wins_on_same_path() {
        let rebuilt = reconstruct(&[entry("a", "first"), entry("a", "second")]);
        assert_eq!(rebuilt, json!({"a": "first"}));
    }

    #[test]
    fn test_longer_path_cannot_descend_through_scalar() {
        let rebuilt = reconstruct(&[entry("a", "leaf"), entry("a.b", "dropped"), entry("c", "kept")]);
        assert_eq!(rebuilt, json!({"a": "leaf", "c": "kept"}));
    }

    #[test]
    fn test_shorter_path_does_not_replace_object() {
        let rebuilt = reconstruct(&[entry("a.b", "deep"), entry("a", "dropped")]);
        assert_eq!(rebuilt, json!({"a": {"b": "deep"}}));
    }

    #[test]
    fn test_root_scalar_goes_under_empty_key() {
        let rebuilt = reconstruct(&flatten(&json!("hello")));
        assert_eq!(rebuilt, json!({"": "hello"}));
    }

    #[test]
    fn test_no_entries_yields_empty_object() {
        assert_eq!(reconstruct(&[]), json!({}));
    }
}
