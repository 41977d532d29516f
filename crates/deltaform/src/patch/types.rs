//! Core types for JSON Patch documents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use deltaform_json_pointer::{format_json_pointer, parse_json_pointer_relaxed, Path};

use crate::walk::WalkError;

// ── Errors ────────────────────────────────────────────────────────────────

/// Errors raised while decoding or applying a patch document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// An operation's target path did not resolve against the document.
    #[error("cannot resolve {pointer:?} (operation {index})")]
    Resolution { pointer: String, index: usize },
    /// A `test` operation's expected value did not match.
    #[error("test failed at {pointer:?} (operation {index})")]
    TestFailed { pointer: String, index: usize },
    /// A wire-format operation object is malformed.
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
    /// The target model could not be canonicalized or rebuilt.
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Failure applying one operation; classified by the batch applier.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("TEST")]
    Test,
}

// ── Operations ────────────────────────────────────────────────────────────

/// A single JSON Patch (RFC 6902) operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Move { path: Path, from: Path },
    Copy { path: Path, from: Path },
    Test { path: Path, value: Value },
}

impl Op {
    /// The operation's name on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// The operation's target path.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// The target path as a JSON Pointer string.
    pub fn pointer(&self) -> String {
        format_json_pointer(self.path())
    }
}

// ── Patch document ────────────────────────────────────────────────────────

/// An ordered sequence of patch operations.
///
/// Serializes to the RFC 6902 wire format: a JSON array of
/// `{op, path, value?/from?}` objects. Operations can be appended fluently:
///
/// ```
/// use deltaform::patch::PatchDocument;
///
/// let patch = PatchDocument::new()
///     .replace("/nested/prop", "bar")
///     .remove("/obsolete");
/// assert_eq!(patch.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatchDocument {
    ops: Vec<Op>,
}

impl PatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn add(mut self, pointer: &str, value: impl Into<Value>) -> Self {
        self.ops.push(Op::Add {
            path: parse_json_pointer_relaxed(pointer),
            value: value.into(),
        });
        self
    }

    pub fn remove(mut self, pointer: &str) -> Self {
        self.ops.push(Op::Remove {
            path: parse_json_pointer_relaxed(pointer),
        });
        self
    }

    pub fn replace(mut self, pointer: &str, value: impl Into<Value>) -> Self {
        self.ops.push(Op::Replace {
            path: parse_json_pointer_relaxed(pointer),
            value: value.into(),
        });
        self
    }

    pub fn mov(mut self, from: &str, pointer: &str) -> Self {
        self.ops.push(Op::Move {
            path: parse_json_pointer_relaxed(pointer),
            from: parse_json_pointer_relaxed(from),
        });
        self
    }

    pub fn copy(mut self, from: &str, pointer: &str) -> Self {
        self.ops.push(Op::Copy {
            path: parse_json_pointer_relaxed(pointer),
            from: parse_json_pointer_relaxed(from),
        });
        self
    }

    pub fn test(mut self, pointer: &str, value: impl Into<Value>) -> Self {
        self.ops.push(Op::Test {
            path: parse_json_pointer_relaxed(pointer),
            value: value.into(),
        });
        self
    }
}

impl From<Vec<Op>> for PatchDocument {
    fn from(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}

impl FromIterator<Op> for PatchDocument {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PatchDocument {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl Serialize for PatchDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        super::codec::to_json_document(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PatchDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        super::codec::from_json_document(&raw).map_err(serde::de::Error::custom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
