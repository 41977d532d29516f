//! JSON Pointer (RFC 6901) utilities.
//!
//! Implements the pointer grammar of [RFC 6901](https://tools.ietf.org/html/rfc6901):
//! parsing pointer strings into path components, formatting paths back into
//! pointer strings, component escaping, and value lookup inside a
//! `serde_json::Value` document.
//!
//! # Example
//!
//! ```
//! use deltaform_json_pointer::{parse_json_pointer, format_json_pointer, get};
//!
//! // Parse a JSON pointer string into path components
//! let path = parse_json_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! // Format path components back to a JSON pointer string
//! let pointer = format_json_pointer(&path);
//! assert_eq!(pointer, "/foo/bar");
//!
//! // Get a value from a JSON document
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! let val = get(&doc, &path);
//! assert_eq!(val, Some(&serde_json::json!(42)));
//! ```

pub mod types;
pub use types::{Path, PathStep};

pub mod get;
pub use get::{get, get_mut};

pub mod validate;
pub use validate::{validate_json_pointer, validate_path, ValidationError};

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into path components.
///
/// - The empty string is the root path and returns an empty vec.
/// - The leading `/` is stripped; each component is unescaped.
/// - `"/"` addresses the member with the empty-string key.
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/"), vec![""]);
/// assert_eq!(parse_json_pointer("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_component).collect()
}

/// Parse a JSON Pointer string that may lack the leading `/`.
///
/// Convenience for call sites that accept hand-written pointers; absolute
/// pointers and the empty string behave exactly like [`parse_json_pointer`].
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::parse_json_pointer_relaxed;
///
/// assert_eq!(parse_json_pointer_relaxed("foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_json_pointer_relaxed("/foo/bar"), vec!["foo", "bar"]);
/// ```
pub fn parse_json_pointer_relaxed(pointer: &str) -> Path {
    if pointer.starts_with('/') || pointer.is_empty() {
        return parse_json_pointer(pointer);
    }
    let mut absolute = String::with_capacity(pointer.len() + 1);
    absolute.push('/');
    absolute.push_str(pointer);
    parse_json_pointer(&absolute)
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["foo".to_string(), "bar".to_string()]), "/foo/bar");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a path addresses the document root.
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::is_root;
///
/// assert!(is_root(&[]));
/// assert!(!is_root(&["foo".to_string()]));
/// ```
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if `prefix` is a prefix of `path`.
///
/// A path is considered prefixed by itself, so this is true when `path`
/// equals `prefix` or lies anywhere inside the subtree `prefix` addresses.
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::is_prefix;
///
/// let prefix = vec!["foo".to_string()];
/// let inner = vec!["foo".to_string(), "bar".to_string()];
/// assert!(is_prefix(&prefix, &inner));
/// assert!(is_prefix(&prefix, &prefix));
/// assert!(!is_prefix(&inner, &prefix));
/// ```
pub fn is_prefix(prefix: &[String], path: &[String]) -> bool {
    if path.len() < prefix.len() {
        return false;
    }
    path[..prefix.len()] == *prefix
}

/// Check if a string is a valid non-negative array index per RFC 6901.
///
/// Leading zeros are rejected ("0" itself is fine).
///
/// # Example
///
/// ```
/// use deltaform_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(steps: &[&str]) -> Path {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_root_pointer() {
        assert_eq!(parse_json_pointer(""), Vec::<String>::new());
    }

    #[test]
    fn parse_empty_key_pointer() {
        assert_eq!(parse_json_pointer("/"), path(&[""]));
    }

    #[test]
    fn parse_unescapes_components() {
        assert_eq!(parse_json_pointer("/m~0n/o~1p"), path(&["m~n", "o/p"]));
    }

    #[test]
    fn format_escapes_components() {
        assert_eq!(format_json_pointer(&path(&["m~n", "o/p"])), "/m~0n/o~1p");
    }

    #[test]
    fn parse_format_inverse() {
        for ptr in ["", "/a", "/a/b/c", "/a~0b", "/x~1y/z", "/0/1/2"] {
            assert_eq!(format_json_pointer(&parse_json_pointer(ptr)), ptr);
        }
    }

    #[test]
    fn prefix_of_equal_path() {
        assert!(is_prefix(&path(&["a", "b"]), &path(&["a", "b"])));
    }

    #[test]
    fn prefix_of_descendant() {
        assert!(is_prefix(&path(&["a"]), &path(&["a", "b", "c"])));
    }

    #[test]
    fn prefix_rejects_sibling() {
        assert!(!is_prefix(&path(&["a"]), &path(&["b", "a"])));
    }

    #[test]
    fn empty_prefix_matches_everything() {
        assert!(is_prefix(&[], &path(&["a"])));
        assert!(is_prefix(&[], &[]));
    }

    #[test]
    fn index_validation() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("42"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("007"));
        assert!(!is_valid_index("4x"));
    }
}
