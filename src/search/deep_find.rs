// src/search/deep_find.rs

use serde_json::Value;

/// One `key => value` pair found somewhere in a tree, together with the map
/// that holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub key: &'a str,
    pub value: &'a Value,
    pub container: &'a Value,
}

/// Walks every map entry below `root` and keeps the ones accepted by `predicate`.
///
/// Traversal is depth-first and pre-order: the entries of a map are tested in
/// insertion order before any of its values are descended into, and sequence
/// elements are visited left to right. A matching entry is still descended
/// into, so a key nested under the same key is reported again.
///
/// Uses an explicit stack, so deeply nested feeds cannot overflow the call stack.
pub fn find_all_matching<'a, F>(root: &'a Value, mut predicate: F) -> Vec<Match<'a>>
where
    F: FnMut(&str, &Value, &Value) -> bool,
{
    let mut matches = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                for (key, value) in map {
                    if predicate(key.as_str(), value, node) {
                        matches.push(Match {
                            key: key.as_str(),
                            value,
                            container: node,
                        });
                    }
                }
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    matches
}

/// Returns every value stored under `key`, at any depth below `root`.
///
/// `Null` (or any scalar) yields an empty list.
pub fn find_all_by_key<'a>(root: &'a Value, key: &str) -> Vec<&'a Value> {
    find_all_matching(root, |k, _, _| k == key)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Like [`find_all_by_key`], but skips blank values and keeps the whole match.
pub fn locate_all_by_key<'a>(root: &'a Value, key: &str) -> Vec<Match<'a>> {
    find_all_matching(root, |k, v, _| k == key && is_present(v))
}

/// A value is present unless it is null, a whitespace-only string, or an
/// empty sequence or map. `false` and `0` count as present.
pub fn is_present(node: &Value) -> bool {
    match node {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Human-readable name of a node's shape, used in error messages.
pub fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}
