//! Structural model walker.
//!
//! Canonicalizes a typed model into a JSON value tree (serde carries the
//! serialized-name annotations) and enumerates the tree into an ordered
//! sequence of [`ValueNode`]s: depth-first, declaration order, composites
//! before their children. Both the differ and the applier canonicalize their
//! inputs through this module.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use deltaform_json_pointer::Path;

/// Maximum nesting depth a walkable tree may have.
///
/// Serde models cannot normally express cycles, but raw `Value` trees can be
/// arbitrarily deep; the bound keeps traversal finite.
pub const MAX_DEPTH: usize = 64;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The model cannot be represented by the serialization data model.
    #[error("UNSUPPORTED_SHAPE: {0}")]
    UnsupportedShape(String),
    /// The tree exceeds [`MAX_DEPTH`].
    #[error("DEPTH_LIMIT")]
    DepthLimit,
}

// ── Node model ────────────────────────────────────────────────────────────

/// The JSON shape of a walked location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }
}

/// A single walked location: its canonical path, shape, and (for leaves)
/// scalar value. Composite nodes do not carry their subtree; their children
/// follow them in the walk order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    pub path: Path,
    pub kind: NodeKind,
    pub value: Option<Value>,
}

// ── Canonicalization ──────────────────────────────────────────────────────

/// Canonicalize a typed model into a JSON value tree.
///
/// Serialized names come from the model's serde annotations; field order
/// follows declaration order. Read-only members are naturally supported,
/// serialization only reads.
pub fn to_value<T: Serialize + ?Sized>(model: &T) -> Result<Value, WalkError> {
    serde_json::to_value(model).map_err(|e| WalkError::UnsupportedShape(e.to_string()))
}

/// Rebuild a typed model from a canonical value tree.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, WalkError> {
    serde_json::from_value(value).map_err(|e| WalkError::UnsupportedShape(e.to_string()))
}

// ── Traversal ─────────────────────────────────────────────────────────────

fn traverse(
    value: &Value,
    path: &mut Path,
    depth: usize,
    visit: &mut dyn FnMut(&Path, &Value),
) -> Result<(), WalkError> {
    if depth > MAX_DEPTH {
        return Err(WalkError::DepthLimit);
    }
    visit(path, value);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key.clone());
                traverse(child, path, depth + 1, visit)?;
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(index.to_string());
                traverse(child, path, depth + 1, visit)?;
                path.pop();
            }
        }
        _ => {}
    }
    Ok(())
}

/// Enumerate a value tree into an ordered sequence of [`ValueNode`]s.
pub fn walk(doc: &Value) -> Result<Vec<ValueNode>, WalkError> {
    let mut nodes = Vec::new();
    traverse(doc, &mut Vec::new(), 0, &mut |path, value| {
        let kind = NodeKind::of(value);
        nodes.push(ValueNode {
            path: path.clone(),
            kind,
            value: if kind.is_composite() {
                None
            } else {
                Some(value.clone())
            },
        });
    })?;
    Ok(nodes)
}

/// Check that a value tree is walkable (within the depth bound) without
/// materializing nodes.
pub fn verify(doc: &Value) -> Result<(), WalkError> {
    traverse(doc, &mut Vec::new(), 0, &mut |_, _| {})
}

// ── Tests ─────────────────────────────────────────────────────────────────
