//! Value lookup by path inside a `serde_json::Value` document.

use serde_json::Value;

/// Get a reference to the value at `path`.
///
/// Returns `None` when any step fails to resolve: a missing object key, an
/// out-of-range or non-numeric array index, the `-` append token, or a step
/// into a scalar.
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(val);
    }
    let mut current = val;
    for step in path {
        match current {
            Value::Array(arr) => {
                if step == "-" {
                    return None;
                }
                let idx: usize = step.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Get a mutable reference to the value at `path`.
///
/// Resolution rules are identical to [`get`].
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    if path.is_empty() {
        return Some(val);
    }
    let mut current = val;
    for step in path {
        match current {
            Value::Array(arr) => {
                if step == "-" {
                    return None;
                }
                let idx: usize = step.parse().ok()?;
                current = arr.get_mut(idx)?;
            }
            Value::Object(map) => {
                current = map.get_mut(step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
