//! Wire codec for patch documents.
//!
//! Converts operations to and from the RFC 6902 JSON representation: an
//! array of objects with `op`, `path`, and (per operation) `value` or `from`.

use serde_json::{json, Value};

use deltaform_json_pointer::{format_json_pointer, parse_json_pointer, validate_json_pointer};

use super::types::{Op, PatchDocument, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[String]) -> Value {
    Value::String(format_json_pointer(path))
}

fn decode_path(op: &str, key: &str, v: Option<&Value>) -> Result<Vec<String>, PatchError> {
    let raw = v
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp(format!("{op} requires a string {key:?}")))?;
    validate_json_pointer(raw)
        .map_err(|e| PatchError::InvalidOp(format!("bad {key:?} in {op}: {e}")))?;
    Ok(parse_json_pointer(raw))
}

fn required_value(op: &str, v: Option<&Value>) -> Result<Value, PatchError> {
    v.cloned()
        .ok_or_else(|| PatchError::InvalidOp(format!("{op} requires \"value\"")))
}

// ── Encoding ──────────────────────────────────────────────────────────────

/// Serialize an operation to its wire object.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": encode_path(path),
            "value": value
        }),
    }
}

/// Serialize a whole document to the wire array.
pub fn to_json_document(patch: &PatchDocument) -> Value {
    Value::Array(patch.ops().iter().map(to_json).collect())
}

// ── Decoding ──────────────────────────────────────────────────────────────

/// Deserialize a wire object into an operation.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing \"op\" field".into()))?;
    let path = decode_path(op, "path", obj.get("path"))?;

    match op {
        "add" => Ok(Op::Add {
            path,
            value: required_value(op, obj.get("value"))?,
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: required_value(op, obj.get("value"))?,
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_path(op, "from", obj.get("from"))?,
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_path(op, "from", obj.get("from"))?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: required_value(op, obj.get("value"))?,
        }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Deserialize a wire array into a document.
pub fn from_json_document(v: &Value) -> Result<PatchDocument, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────
