//! Type definitions for JSON Pointer paths.

/// A single step in a JSON Pointer path.
///
/// Object keys and array indices are both carried as strings; array indices
/// are only interpreted numerically at the point of traversal.
pub type PathStep = String;

/// A parsed JSON Pointer path.
///
/// The empty path addresses the document root.
pub type Path = Vec<PathStep>;
