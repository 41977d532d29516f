//! Patch application.
//!
//! Operations are applied linearly against a working copy of the target.
//! Resolution failures and failed `test` operations are skipped when
//! `ignore_errors` is set (the default), otherwise they abort the batch.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use deltaform_json_pointer::{get, get_mut, is_prefix, is_valid_index};

use crate::settings::{values_equal, DiffSettings, SerializerSettings};
use crate::walk;

use super::types::{Op, OpError, PatchDocument, PatchError};

// ── Path resolution ───────────────────────────────────────────────────────

fn parse_index(step: &str) -> Result<usize, OpError> {
    if !is_valid_index(step) {
        return Err(OpError::InvalidIndex);
    }
    step.parse().map_err(|_| OpError::InvalidIndex)
}

/// Resolve a non-root path to its parent container and final step.
fn resolve_parent<'a>(
    doc: &'a mut Value,
    path: &'a [String],
) -> Result<(&'a mut Value, &'a String), OpError> {
    let (parent_path, leaf) = path.split_at(path.len() - 1);
    let parent = get_mut(doc, parent_path).ok_or(OpError::NotFound)?;
    Ok((parent, &leaf[0]))
}

// ── Individual operation applicators ──────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<(), OpError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, key) = resolve_parent(doc, path)?;
    match parent {
        Value::Object(map) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            if key == "-" {
                arr.push(value);
                return Ok(());
            }
            let idx = parse_index(key)?;
            if idx > arr.len() {
                return Err(OpError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(OpError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Value, OpError> {
    if path.is_empty() {
        return Err(OpError::InvalidTarget);
    }
    let (parent, key) = resolve_parent(doc, path)?;
    match parent {
        Value::Object(map) => map.remove(key).ok_or(OpError::NotFound),
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            if idx >= arr.len() {
                return Err(OpError::NotFound);
            }
            Ok(arr.remove(idx))
        }
        _ => Err(OpError::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<(), OpError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, key) = resolve_parent(doc, path)?;
    match parent {
        Value::Object(map) => {
            let slot = map.get_mut(key).ok_or(OpError::NotFound)?;
            *slot = value;
            Ok(())
        }
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            let slot = arr.get_mut(idx).ok_or(OpError::NotFound)?;
            *slot = value;
            Ok(())
        }
        _ => Err(OpError::InvalidTarget),
    }
}

fn apply_move(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), OpError> {
    // A location cannot be moved into its own subtree.
    if is_prefix(from, path) && path.len() > from.len() {
        return Err(OpError::InvalidTarget);
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_copy(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), OpError> {
    let value = get(doc, from).ok_or(OpError::NotFound)?.clone();
    apply_add(doc, path, value)
}

fn apply_test(
    doc: &Value,
    path: &[String],
    expected: &Value,
    serializer: &SerializerSettings,
) -> Result<(), OpError> {
    let actual = get(doc, path).ok_or(OpError::NotFound)?;
    if values_equal(actual, expected, serializer) {
        Ok(())
    } else {
        Err(OpError::Test)
    }
}

// ── Batch application ─────────────────────────────────────────────────────

/// Apply a single operation to the document in place.
pub fn apply_op(doc: &mut Value, op: &Op, serializer: &SerializerSettings) -> Result<(), OpError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path).map(|_| ()),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Move { path, from } => apply_move(doc, path, from),
        Op::Copy { path, from } => apply_copy(doc, path, from),
        Op::Test { path, value } => apply_test(doc, path, value, serializer),
    }
}

/// Apply a patch document to a value tree, returning the patched tree.
///
/// Operations are applied in order against the owned working copy. With
/// `ignore_errors` set, an operation that fails to resolve (or whose `test`
/// mismatches) is skipped and processing continues. In strict mode the first
/// failure aborts the batch; operations already applied are not rolled back,
/// the working copy is simply discarded with the error.
pub fn apply_document(
    doc: Value,
    patch: &PatchDocument,
    settings: &DiffSettings,
) -> Result<Value, PatchError> {
    let mut working = doc;
    for (index, op) in patch.ops().iter().enumerate() {
        match apply_op(&mut working, op, &settings.serializer) {
            Ok(()) => {}
            Err(_) if settings.ignore_errors => {}
            Err(OpError::Test) => {
                return Err(PatchError::TestFailed {
                    pointer: op.pointer(),
                    index,
                });
            }
            Err(_) => {
                return Err(PatchError::Resolution {
                    pointer: op.pointer(),
                    index,
                });
            }
        }
    }
    Ok(working)
}

/// Apply a patch document to a typed model.
///
/// The model is canonicalized through the walker, patched as a value tree,
/// and rebuilt. The caller's `target` is left untouched.
pub fn patch_with_json_patch<T>(
    patch: &PatchDocument,
    target: &T,
    settings: &DiffSettings,
) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let doc = walk::to_value(target)?;
    let patched = apply_document(doc, patch, settings)?;
    Ok(walk::from_value(patched)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use deltaform_json_pointer::parse_json_pointer;
    use serde_json::json;

    fn serializer() -> SerializerSettings {
        SerializerSettings::default()
    }

    fn op_add(pointer: &str, value: Value) -> Op {
        Op::Add {
            path: parse_json_pointer(pointer),
            value,
        }
    }

    #[test]
    fn add_to_object() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &op_add("/b", json!(2)), &serializer()).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_into_array() {
        let mut doc = json!([1, 2, 3]);
        apply_op(&mut doc, &op_add("/1", json!(99)), &serializer()).unwrap();
        assert_eq!(doc, json!([1, 99, 2, 3]));
    }

    #[test]
    fn add_append_token() {
        let mut doc = json!([1, 2]);
        apply_op(&mut doc, &op_add("/-", json!(3)), &serializer()).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));
    }

    #[test]
    fn add_at_array_end_index() {
        let mut doc = json!([1]);
        apply_op(&mut doc, &op_add("/1", json!(2)), &serializer()).unwrap();
        assert_eq!(doc, json!([1, 2]));
    }

    #[test]
    fn add_past_array_end_fails() {
        let mut doc = json!([1]);
        let err = apply_op(&mut doc, &op_add("/5", json!(2)), &serializer());
        assert_eq!(err, Err(OpError::InvalidIndex));
    }

    #[test]
    fn add_rejects_leading_zero_index() {
        let mut doc = json!([1, 2]);
        let err = apply_op(&mut doc, &op_add("/01", json!(9)), &serializer());
        assert_eq!(err, Err(OpError::InvalidIndex));
    }

    #[test]
    fn add_at_root_replaces_document() {
        let mut doc = json!({"a": 1});
        apply_op(&mut doc, &op_add("", json!(42)), &serializer()).unwrap();
        assert_eq!(doc, json!(42));
    }

    #[test]
    fn remove_object_member() {
        let mut doc = json!({"a": 1, "b": 2});
        let op = Op::Remove {
            path: parse_json_pointer("/a"),
        };
        apply_op(&mut doc, &op, &serializer()).unwrap();
        assert_eq!(doc, json!({"b": 2}));
    }

    #[test]
    fn remove_array_element() {
        let mut doc = json!([1, 2, 3]);
        let op = Op::Remove {
            path: parse_json_pointer("/1"),
        };
        apply_op(&mut doc, &op, &serializer()).unwrap();
        assert_eq!(doc, json!([1, 3]));
    }

    #[test]
    fn remove_root_is_invalid() {
        let mut doc = json!({"a": 1});
        let op = Op::Remove {
            path: parse_json_pointer(""),
        };
        assert_eq!(
            apply_op(&mut doc, &op, &serializer()),
            Err(OpError::InvalidTarget)
        );
    }

    #[test]
    fn replace_requires_existing_member() {
        let mut doc = json!({"a": 1});
        let op = Op::Replace {
            path: parse_json_pointer("/b"),
            value: json!(2),
        };
        assert_eq!(
            apply_op(&mut doc, &op, &serializer()),
            Err(OpError::NotFound)
        );
    }

    #[test]
    fn replace_through_scalar_fails() {
        let mut doc = json!({"a": 1});
        let op = Op::Replace {
            path: parse_json_pointer("/a/b"),
            value: json!(2),
        };
        assert_eq!(
            apply_op(&mut doc, &op, &serializer()),
            Err(OpError::InvalidTarget)
        );
        let deep = Op::Replace {
            path: parse_json_pointer("/a/b/c"),
            value: json!(2),
        };
        assert_eq!(
            apply_op(&mut doc, &deep, &serializer()),
            Err(OpError::NotFound)
        );
    }

    #[test]
    fn move_between_members() {
        let mut doc = json!({"a": 1, "b": 2});
        let op = Op::Move {
            path: parse_json_pointer("/c"),
            from: parse_json_pointer("/a"),
        };
        apply_op(&mut doc, &op, &serializer()).unwrap();
        assert_eq!(doc, json!({"b": 2, "c": 1}));
    }

    #[test]
    fn move_into_own_subtree_fails() {
        let mut doc = json!({"a": {"b": 1}});
        let op = Op::Move {
            path: parse_json_pointer("/a/b/c"),
            from: parse_json_pointer("/a"),
        };
        assert_eq!(
            apply_op(&mut doc, &op, &serializer()),
            Err(OpError::InvalidTarget)
        );
    }

    #[test]
    fn copy_duplicates_subtree() {
        let mut doc = json!({"a": {"x": 1}, "b": {}});
        let op = Op::Copy {
            path: parse_json_pointer("/b/x"),
            from: parse_json_pointer("/a/x"),
        };
        apply_op(&mut doc, &op, &serializer()).unwrap();
        assert_eq!(doc, json!({"a": {"x": 1}, "b": {"x": 1}}));
    }

    #[test]
    fn test_op_pass_and_fail() {
        let mut doc = json!({"a": 42});
        let pass = Op::Test {
            path: parse_json_pointer("/a"),
            value: json!(42),
        };
        apply_op(&mut doc, &pass, &serializer()).unwrap();
        let fail = Op::Test {
            path: parse_json_pointer("/a"),
            value: json!(99),
        };
        assert_eq!(apply_op(&mut doc, &fail, &serializer()), Err(OpError::Test));
    }

    #[test]
    fn test_op_honors_date_conventions() {
        use crate::settings::{DateParseHandling, DateTimeZoneHandling};
        let serializer = SerializerSettings {
            date_parse_handling: DateParseHandling::DateTime,
            date_time_zone_handling: DateTimeZoneHandling::Utc,
        };
        let mut doc = json!({"when": "2021-03-01T10:00:00Z"});
        let op = Op::Test {
            path: parse_json_pointer("/when"),
            value: json!("2021-03-01T11:00:00+01:00"),
        };
        apply_op(&mut doc, &op, &serializer).unwrap();
    }

    #[test]
    fn batch_skips_unresolvable_op_by_default() {
        let doc = json!({"nested": {"prop": "buz"}});
        let patch = PatchDocument::new()
            .replace("/nested/prop", "bar")
            .replace("/does/not/exist", "buz");
        let out = apply_document(doc, &patch, &DiffSettings::default()).unwrap();
        assert_eq!(out, json!({"nested": {"prop": "bar"}}));
    }

    #[test]
    fn batch_strict_mode_reports_pointer_and_index() {
        let doc = json!({"nested": {"prop": "buz"}});
        let patch = PatchDocument::new()
            .replace("/nested/prop", "bar")
            .replace("/does/not/exist", "buz");
        let strict = DiffSettings {
            ignore_errors: false,
            ..Default::default()
        };
        let err = apply_document(doc, &patch, &strict).unwrap_err();
        assert_eq!(
            err,
            PatchError::Resolution {
                pointer: "/does/not/exist".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn batch_strict_mode_fails_on_test_mismatch() {
        let doc = json!({"a": 1});
        let patch = PatchDocument::new().test("/a", 2).replace("/a", 3);
        let strict = DiffSettings {
            ignore_errors: false,
            ..Default::default()
        };
        let err = apply_document(doc, &patch, &strict).unwrap_err();
        assert_eq!(
            err,
            PatchError::TestFailed {
                pointer: "/a".to_string(),
                index: 0
            }
        );
    }

    #[test]
    fn batch_tolerant_mode_continues_past_failed_test() {
        let doc = json!({"a": 1});
        let patch = PatchDocument::new().test("/a", 2).replace("/a", 3);
        let out = apply_document(doc, &patch, &DiffSettings::default()).unwrap();
        assert_eq!(out, json!({"a": 3}));
    }

    #[test]
    fn typed_apply_leaves_target_untouched() {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
        struct Model {
            #[serde(rename = "prop")]
            prop: String,
        }

        let target = Model { prop: "foo".into() };
        let patch = PatchDocument::new().replace("/prop", "baz");
        let patched: Model =
            patch_with_json_patch(&patch, &target, &DiffSettings::default()).unwrap();
        assert_eq!(patched.prop, "baz");
        assert_eq!(target.prop, "foo");
    }
}
