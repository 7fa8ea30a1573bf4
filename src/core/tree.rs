//! Translation trees and the operations the extractor performs on them.
//!
//! A translation tree is a JSON object whose nested objects are key path
//! segments and whose leaves are translated strings (or structured defaults
//! such as arrays). Insertion order is preserved and drives serialization.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde_json::{Map, Value};

/// Translation data for one language.
pub type Translation = Map<String, Value>;

/// Default values that look like JSON arrays or objects.
static STRUCTURED_DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\[{].*[\]}]$").unwrap());

/// A path where one side of a merge has an object and the other a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    /// Dot-joined path of the conflicting key.
    pub path: String,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is an object on one side and a value on the other", self.path)
    }
}

/// Build the tree declared by extracted keys.
///
/// Each key is `path[<key_value_separator>default]`. The path is split on
/// `key_separator`; the default (empty when absent) becomes the leaf value.
pub fn build_skeleton(keys: &[String], key_separator: &str, key_value_separator: &str) -> Translation {
    let mut skeleton = Translation::new();
    for key in keys {
        let (path, default) = match key.split_once(key_value_separator) {
            Some((path, default)) => (path, Some(default)),
            None => (key.as_str(), None),
        };
        let segments: Vec<&str> = path.split(key_separator).collect();
        deep_set(&mut skeleton, &segments, parse_default_value(default));
    }
    skeleton
}

/// Convert a default value written after the key/value separator.
///
/// `[...]` and `{...}` are parsed as JSON (`{{...}}` is an interpolation, not
/// an object). Anything that does not parse stays a string.
pub fn parse_default_value(raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::String(String::new());
    };
    if STRUCTURED_DEFAULT_RE.is_match(raw)
        && !raw.starts_with("{{")
        && let Ok(value) = serde_json::from_str(raw)
    {
        return value;
    }
    Value::String(raw.to_string())
}

/// Set `value` at `path`, creating intermediate objects.
///
/// Intermediate values that are not objects are replaced. A blank value never
/// replaces an existing non-blank value at the final segment.
pub fn deep_set(tree: &mut Translation, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            if is_blank(&value)
                && let Some(existing) = tree.get(*last)
                && !is_blank(existing)
            {
                return;
            }
            tree.insert(last.to_string(), value);
        }
        [first, rest @ ..] => {
            let next = tree
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            if let Value::Object(map) = next {
                deep_set(map, rest, value);
            }
        }
    }
}

/// Merge `source` into `target`, keeping what `target` already holds.
///
/// - objects on both sides are merged recursively
/// - keys missing from `target` are inserted
/// - a leaf in `target` is kept unless it is blank and the source leaf is not
/// - object on one side, leaf on the other: `target` kept, conflict reported;
///   a blank `target` leaf is replaced by the `source` object
///
/// Keys only present in `target` are left untouched.
pub fn deep_merge(target: &mut Translation, source: Translation) -> Vec<MergeConflict> {
    let mut conflicts = Vec::new();
    merge_into(target, source, "", &mut conflicts);
    conflicts
}

fn merge_into(
    target: &mut Translation,
    source: Translation,
    prefix: &str,
    conflicts: &mut Vec<MergeConflict>,
) {
    for (key, source_value) in source {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match target.get_mut(&key) {
            None => {
                target.insert(key, source_value);
            }
            Some(target_value) => match (target_value, source_value) {
                (Value::Object(target_map), Value::Object(source_map)) => {
                    merge_into(target_map, source_map, &path, conflicts);
                }
                (target_value, source_value @ Value::Object(_)) if is_blank(&*target_value) => {
                    *target_value = source_value;
                    conflicts.push(MergeConflict { path });
                }
                (Value::Object(_), _) | (_, Value::Object(_)) => {
                    conflicts.push(MergeConflict { path });
                }
                (target_value, source_value) => {
                    if is_blank(target_value) && !is_blank(&source_value) {
                        *target_value = source_value;
                    }
                }
            },
        }
    }
}

/// Empty string or null.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Copy of `tree` with keys in byte-wise order at every level.
///
/// Arrays are kept as they are, including any objects inside them.
pub fn sort_tree(tree: &Translation) -> Translation {
    let mut keys: Vec<&String> = tree.keys().collect();
    keys.sort();

    keys.into_iter()
        .filter_map(|key| {
            let value = match tree.get(key)? {
                Value::Object(map) => Value::Object(sort_tree(map)),
                other => other.clone(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

/// Number of object levels below `value` along its shallowest branch.
///
/// Leaves, arrays and empty objects have depth 0.
pub fn min_depth(value: &Value) -> usize {
    match value {
        Value::Object(map) => map
            .values()
            .map(min_depth)
            .min()
            .map_or(0, |depth| depth + 1),
        _ => 0,
    }
}
