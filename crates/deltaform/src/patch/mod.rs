//! JSON Patch (RFC 6902): operation types, wire codec, and application.
//!
//! The six standard operations are supported: `add`, `remove`, `replace`,
//! `move`, `copy`, `test`. Application runs against a working copy of the
//! target with a configurable skip-or-fail policy for unresolvable paths.

pub mod types;
pub mod codec;
pub mod apply;

pub use types::{Op, OpError, PatchDocument, PatchError};
pub use codec::{from_json, from_json_document, to_json, to_json_document};
pub use apply::{apply_document, apply_op, patch_with_json_patch};
