//! Dotted-path addressing inside a [`Value`] tree.
//!
//! A path is a string of `.`-separated segments; the empty string addresses
//! the root itself. Each segment is either a map key or a sequence index in
//! base 10. Which one applies is never guessed from the segment text: the
//! resolver looks at the container actually present at each step, so `"0"`
//! against an object means the key `"0"`, and against an array means index 0.
//!
//! Keys containing `.` or `\` are escaped as `\.` and `\\` so they survive a
//! round trip. A backslash before any other character is kept literally.
//!
//! ```rust
//! use serde_superjson::path::{join, split};
//!
//! let segments = split("user.profile\\.v2.0");
//! assert_eq!(segments, vec!["user", "profile.v2", "0"]);
//! assert_eq!(join(&segments), "user.profile\\.v2.0");
//! ```

use crate::{Map, Value};

/// Splits a path into unescaped segments. The empty path yields no segments.
#[must_use]
pub fn split(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                Some(&next) if next == '.' || next == '\\' => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Escapes a single key so it can be embedded in a path.
#[must_use]
pub fn escape(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for ch in segment.chars() {
        if ch == '.' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Joins segments into a path, escaping each one.
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| escape(s.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses a canonical base-10 sequence index (`"0"`, `"17"`, never `"007"` or `"+1"`).
#[must_use]
pub fn parse_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    segment.parse().ok()
}

/// A location a path resolved to, which the caller may overwrite in place.
#[derive(Debug)]
pub enum Slot<'a> {
    /// The root value itself (empty path)
    Root(&'a mut Value),
    /// An existing entry of a map
    Entry { map: &'a mut Map, key: String },
    /// A key the final segment named that is absent from its parent map
    Vacant { map: &'a mut Map, key: String },
    /// An in-bounds element of a sequence
    Element(&'a mut Value),
}

impl<'a> Slot<'a> {
    /// The value currently held by the slot, or `None` for a vacant key.
    pub fn value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Slot::Root(value) | Slot::Element(value) => Some(&mut **value),
            Slot::Entry { map, key } => map.get_mut(key),
            Slot::Vacant { .. } => None,
        }
    }

    /// Stores `value` in the slot, creating the key if it was vacant.
    pub fn set(self, value: Value) {
        match self {
            Slot::Root(slot) | Slot::Element(slot) => *slot = value,
            Slot::Entry { map, key } | Slot::Vacant { map, key } => {
                map.insert(key, value);
            }
        }
    }

    /// Removes a map entry. Roots and sequence elements cannot be removed
    /// without shifting other paths, so they are set to null instead.
    pub fn remove(self) {
        match self {
            Slot::Root(slot) | Slot::Element(slot) => *slot = Value::Null,
            Slot::Entry { map, key } => {
                map.remove(&key);
            }
            Slot::Vacant { .. } => {}
        }
    }
}

/// Resolves `path` against `root`.
///
/// Intermediate segments must name an existing key (objects) or an in-bounds
/// index (arrays). The final segment may name an absent key of an object, in
/// which case [`Slot::Vacant`] is returned; callers that only transform
/// existing values treat that as unresolved. Any other miss yields `None`.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::{path, value, Value};
///
/// let mut tree = value!({ "dates": ["a", "b"] });
/// if let Some(slot) = path::resolve(&mut tree, "dates.1") {
///     slot.set(Value::from("c"));
/// }
/// assert_eq!(tree, value!({ "dates": ["a", "c"] }));
///
/// assert!(path::resolve(&mut tree, "dates.2").is_none());
/// assert!(path::resolve(&mut tree, "x.y.z").is_none());
/// ```
pub fn resolve<'a>(root: &'a mut Value, path: &str) -> Option<Slot<'a>> {
    let mut segments = split(path);
    let last = match segments.pop() {
        Some(last) => last,
        None => return Some(Slot::Root(root)),
    };

    let mut cursor = root;
    for segment in &segments {
        cursor = descend(cursor, segment)?;
    }

    match cursor {
        Value::Object(map) => {
            if map.contains_key(&last) {
                Some(Slot::Entry { map, key: last })
            } else {
                Some(Slot::Vacant { map, key: last })
            }
        }
        Value::Array(items) => {
            let index = parse_index(&last)?;
            items.get_mut(index).map(Slot::Element)
        }
        _ => None,
    }
}

fn descend<'a>(cursor: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match cursor {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => items.get_mut(parse_index(segment)?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_split_plain_paths() {
        assert!(split("").is_empty());
        assert_eq!(split("created"), vec!["created"]);
        assert_eq!(split("user.createdAt"), vec!["user", "createdAt"]);
        assert_eq!(split("a..b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_escapes() {
        assert_eq!(split("a\\.b"), vec!["a.b"]);
        assert_eq!(split("a\\\\.b"), vec!["a\\", "b"]);
        assert_eq!(split("a\\nb"), vec!["a\\nb"]);
        assert_eq!(split("trailing\\"), vec!["trailing\\"]);
    }

    #[test]
    fn test_escape_join_inverse() {
        let segments = vec!["we.ird", "back\\slash", "0", ""];
        assert_eq!(split(&join(&segments)), segments);
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("+1"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("1e3"), None);
    }

    #[test]
    fn test_resolve_root() {
        let mut tree = value!("x");
        let slot = resolve(&mut tree, "").unwrap();
        slot.set(value!(1));
        assert_eq!(tree, value!(1));
    }

    #[test]
    fn test_numeric_key_on_object_is_a_key() {
        let mut tree = value!({ "0": "zero" });
        match resolve(&mut tree, "0") {
            Some(Slot::Entry { key, .. }) => assert_eq!(key, "0"),
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_array_in_object() {
        let mut tree = value!({ "matrix": [[1, 2], [3, 4]] });
        let mut slot = resolve(&mut tree, "matrix.1.0").unwrap();
        assert_eq!(slot.value_mut().cloned(), Some(value!(3)));
    }

    #[test]
    fn test_intermediate_miss_is_unresolved() {
        let mut tree = value!({ "a": { "b": 1 } });
        assert!(resolve(&mut tree, "a.c.d").is_none());
        assert!(resolve(&mut tree, "a.b.c").is_none());
    }

    #[test]
    fn test_final_missing_key_is_vacant() {
        let mut tree = value!({ "a": {} });
        let mut slot = resolve(&mut tree, "a.b").unwrap();
        assert!(slot.value_mut().is_none());
        slot.set(Value::Null);
        assert_eq!(tree, value!({ "a": { "b": null } }));
    }

    #[test]
    fn test_remove_entry_keeps_order() {
        let mut tree = value!({ "a": 1, "b": 2, "c": 3 });
        resolve(&mut tree, "b").unwrap().remove();
        let keys: Vec<_> = tree.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_out_of_bounds_index() {
        let mut tree = value!(["a"]);
        assert!(resolve(&mut tree, "1").is_none());
        assert!(resolve(&mut tree, "01").is_none());
    }
}
