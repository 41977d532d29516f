//! Core logic behind the command-line binaries.
//!
//! String-in/string-out entry points so the binaries only handle I/O and
//! exit codes:
//! - `deltaform-diff`  - diff two JSON documents into a patch array
//! - `deltaform-patch` - apply a patch array to a document

use serde_json::Value;
use thiserror::Error;

use crate::diff::diff_values;
use crate::patch::{apply_document, PatchDocument, PatchError};
use crate::settings::DiffSettings;
use crate::walk::WalkError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Patch(#[from] PatchError),
    #[error("{0}")]
    Walk(#[from] WalkError),
}

/// Diff two JSON documents, returning the patch as a pretty-printed array.
pub fn diff_json_docs(src_json: &str, dst_json: &str) -> Result<String, CliError> {
    let src: Value = serde_json::from_str(src_json)?;
    let dst: Value = serde_json::from_str(dst_json)?;
    let patch = diff_values(&src, &dst, &DiffSettings::default(), &[])?;
    Ok(serde_json::to_string_pretty(&patch)?)
}

/// Apply a patch array to a document, returning the patched document.
///
/// `strict` turns resolution failures into errors instead of skips.
pub fn apply_json_patch(doc_json: &str, patch_json: &str, strict: bool) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let patch: PatchDocument = serde_json::from_str(patch_json)?;
    let settings = DiffSettings {
        ignore_errors: !strict,
        ..Default::default()
    };
    let patched = apply_document(doc, &patch, &settings)?;
    Ok(serde_json::to_string_pretty(&patched)?)
}
