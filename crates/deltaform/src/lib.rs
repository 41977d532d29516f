//! deltaform - typed object diffing to JSON Patch (RFC 6902) and tolerant
//! patch application.
//!
//! Two states of a serde model are canonicalized into JSON value trees
//! (serialized names come from the model's serde annotations), compared into
//! an ordered patch document, and such documents can be applied back onto
//! models with a configurable skip-or-fail policy for unresolvable paths.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Contract {
//!     #[serde(rename = "prop")]
//!     prop: String,
//! }
//!
//! let original = Contract { prop: "foo".into() };
//! let updated = Contract { prop: "baz".into() };
//!
//! let patch = deltaform::diff_to_json_patch(&original, &updated).unwrap();
//! let patched: Contract = deltaform::patch_with_json_patch(
//!     &patch,
//!     &original,
//!     &deltaform::DiffSettings::default(),
//! )
//! .unwrap();
//! assert_eq!(patched.prop, "baz");
//! assert_eq!(original.prop, "foo");
//! ```

pub mod walk;
pub mod settings;
pub mod patch;
pub mod diff;
pub mod cli;

pub use diff::{diff_to_json_patch, diff_values, Differ, DifferBuilder};
pub use patch::{patch_with_json_patch, Op, PatchDocument, PatchError};
pub use settings::{
    DateParseHandling, DateTimeZoneHandling, DiffSettings, SerializerSettings,
};
pub use walk::{walk, NodeKind, ValueNode, WalkError};
