//! Path parsing and traversal utilities
//!
//! Documents are addressed with dot-separated paths, with optional array
//! indexing for values nested inside sequences.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `display.label`
//! - Array indexing: `servers[0].host`
//!
//! # Examples
//!
//! ```
//! use ezcfg_content::path::{parse_path, PathSegment, get_at_path};
//! use serde_json::json;
//!
//! let path = parse_path("servers[0].host");
//! assert_eq!(path, vec![
//!     PathSegment::Key("servers".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("host".to_string()),
//! ]);
//!
//! let value = json!({"servers": [{"host": "localhost"}]});
//! assert_eq!(get_at_path(&value, &path), Some(&json!("localhost")));
//! ```

use serde_json::{Map, Value};

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in a mapping (e.g., "display" in "display.label")
    Key(String),
    /// An index in a sequence (e.g., 0 in `servers[0]`)
    Index(usize),
}

/// Parse a path string into segments.
///
/// Empty keys (`a..b`, leading or trailing dots) are skipped and malformed
/// indices are dropped.
///
/// ```
/// use ezcfg_content::path::{parse_path, PathSegment};
///
/// let path = parse_path("display.label");
/// assert_eq!(path, vec![
///     PathSegment::Key("display".to_string()),
///     PathSegment::Key("label".to_string()),
/// ]);
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                if let Ok(index) = index_str.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => current_key.push(ch),
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    segments
}

/// Render segments back into their canonical dotted form.
///
/// ```
/// use ezcfg_content::path::{format_path, parse_path};
///
/// assert_eq!(format_path(&parse_path("a..b[2].c")), "a.b[2].c");
/// ```
pub fn format_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Get a reference to the value at the given path.
///
/// Returns `None` if any segment is missing.
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.get(key),
        PathSegment::Index(idx) => current.get(*idx),
    })
}

/// Set a value at the given path.
///
/// Missing or non-mapping intermediates reached through a key are replaced by
/// empty mappings. Indices must address an existing sequence element.
///
/// Returns `false` if the value could not be placed.
///
/// ```
/// use ezcfg_content::path::{parse_path, set_at_path, get_at_path};
/// use serde_json::json;
///
/// let mut value = json!({});
/// let path = parse_path("display.label");
/// assert!(set_at_path(&mut value, &path, json!("hello")));
/// assert_eq!(value, json!({"display": {"label": "hello"}}));
/// ```
pub fn set_at_path(value: &mut Value, segments: &[PathSegment], new_value: Value) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        *value = new_value;
        return true;
    };

    let slot = match first {
        PathSegment::Key(key) => {
            if !value.is_object() {
                *value = Value::Object(Map::new());
            }
            let Value::Object(map) = value else {
                return false;
            };
            if rest.is_empty() {
                map.insert(key.clone(), new_value);
                return true;
            }
            if matches!(rest.first(), Some(PathSegment::Index(_))) && !map.contains_key(key) {
                return false;
            }
            map.entry(key.clone()).or_insert(Value::Null)
        }
        PathSegment::Index(idx) => match value {
            Value::Array(arr) if *idx < arr.len() => &mut arr[*idx],
            _ => return false,
        },
    };

    set_at_path(slot, rest, new_value)
}

/// Remove the value at the given path.
///
/// Returns the removed value if the path existed, `None` otherwise.
pub fn remove_at_path(value: &mut Value, segments: &[PathSegment]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;

    let mut parent = value;
    for segment in parents {
        parent = match segment {
            PathSegment::Key(key) => parent.get_mut(key.as_str())?,
            PathSegment::Index(idx) => parent.get_mut(*idx)?,
        };
    }

    match (last, parent) {
        (PathSegment::Key(key), Value::Object(map)) => map.shift_remove(key),
        (PathSegment::Index(idx), Value::Array(arr)) if *idx < arr.len() => {
            Some(arr.remove(*idx))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_path_simple() {
        let path = parse_path("volume");
        assert_eq!(path, vec![PathSegment::Key("volume".to_string())]);
    }

    #[test]
    fn test_parse_path_skips_empty_keys() {
        let path = parse_path(".display..label.");
        assert_eq!(
            path,
            vec![
                PathSegment::Key("display".to_string()),
                PathSegment::Key("label".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_path_array_index() {
        let path = parse_path("items[1]");
        assert_eq!(
            path,
            vec![PathSegment::Key("items".to_string()), PathSegment::Index(1)]
        );
    }

    #[test]
    fn test_get_at_path_nested() {
        let value = json!({"display": {"label": "x"}});
        assert_eq!(
            get_at_path(&value, &parse_path("display.label")),
            Some(&json!("x"))
        );
        assert_eq!(get_at_path(&value, &parse_path("display.missing")), None);
    }

    #[test]
    fn test_get_at_path_through_scalar() {
        let value = json!({"display": 3});
        assert_eq!(get_at_path(&value, &parse_path("display.label")), None);
    }

    #[test]
    fn test_set_at_path_creates_intermediates() {
        let mut value = json!({"volume": 1.0});
        assert!(set_at_path(&mut value, &parse_path("a.b.c"), json!(true)));
        assert_eq!(value, json!({"volume": 1.0, "a": {"b": {"c": true}}}));
    }

    #[test]
    fn test_set_at_path_replaces_scalar_intermediate() {
        let mut value = json!({"display": "flat"});
        assert!(set_at_path(&mut value, &parse_path("display.label"), json!("x")));
        assert_eq!(value, json!({"display": {"label": "x"}}));
    }

    #[test]
    fn test_set_at_path_index_out_of_bounds() {
        let mut value = json!({"items": [1]});
        assert!(!set_at_path(&mut value, &parse_path("items[3]"), json!(2)));
        assert!(set_at_path(&mut value, &parse_path("items[0]"), json!(2)));
        assert_eq!(value, json!({"items": [2]}));
    }

    #[test]
    fn test_remove_at_path_keeps_order() {
        let mut value = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(remove_at_path(&mut value, &parse_path("b")), Some(json!(2)));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_at_path_missing() {
        let mut value = json!({"a": 1});
        assert_eq!(remove_at_path(&mut value, &parse_path("a.b")), None);
        assert_eq!(remove_at_path(&mut value, &[]), None);
    }
}
