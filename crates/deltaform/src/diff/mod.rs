//! Object diffing: compute a JSON Patch transforming one state into another.
//!
//! Comparison runs over canonical value trees produced by the walker. Object
//! members diff by key; sequences diff positionally (index as path segment),
//! so a mid-sequence insert or delete produces a replace cascade for the
//! following indices plus one trailing add or remove. This is a deliberate
//! simplicity trade-off, not a minimal edit script.

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};

use deltaform_json_pointer::{is_prefix, parse_json_pointer_relaxed, Path};

use crate::patch::{Op, PatchDocument};
use crate::settings::{scalars_equal, DiffSettings};
use crate::walk::{self, WalkError};

// ── Public API ────────────────────────────────────────────────────────────

/// Diff two states of a typed model with default settings and no filters.
pub fn diff_to_json_patch<T: Serialize>(
    original: &T,
    updated: &T,
) -> Result<PatchDocument, WalkError> {
    DifferBuilder::new().build().diff_to_json_patch(original, updated)
}

/// Diff two canonical value trees.
///
/// `filters` are canonical path prefixes pruned from both sides before
/// comparison; nothing under a filtered path ever produces an operation.
pub fn diff_values(
    src: &Value,
    dst: &Value,
    settings: &DiffSettings,
    filters: &[Path],
) -> Result<PatchDocument, WalkError> {
    walk::verify(src)?;
    walk::verify(dst)?;
    let mut ops = Vec::new();
    diff_at_path(&mut ops, &mut Vec::new(), src, dst, settings, filters);
    Ok(ops.into())
}

// ── Builder ───────────────────────────────────────────────────────────────

/// Accumulates filters and settings for a [`Differ`].
///
/// ```
/// use deltaform::diff::DifferBuilder;
/// use serde_json::Value;
///
/// let differ = DifferBuilder::<Value>::new()
///     .with_filter("/audit")
///     .build();
/// let patch = differ
///     .diff_to_json_patch(&serde_json::json!({"a": 1}), &serde_json::json!({"a": 2}))
///     .unwrap();
/// assert_eq!(patch.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DifferBuilder<T: ?Sized> {
    filters: Vec<Path>,
    settings: DiffSettings,
    _model: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Default for DifferBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> DifferBuilder<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            settings: DiffSettings::default(),
            _model: PhantomData,
        }
    }

    /// Exclude the subtree at `pointer` (and every descendant) from
    /// comparison. Chainable; accepts pointers with or without the leading
    /// slash.
    pub fn with_filter(mut self, pointer: &str) -> Self {
        self.filters.push(parse_json_pointer_relaxed(pointer));
        self
    }

    pub fn with_settings(mut self, settings: DiffSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Freeze the accumulated configuration into a reusable differ.
    pub fn build(self) -> Differ<T> {
        Differ {
            filters: self.filters,
            settings: self.settings,
            _model: PhantomData,
        }
    }
}

/// An immutable comparer bound to a model type.
///
/// Holds no mutable state; safe to share and reuse across threads.
#[derive(Debug, Clone)]
pub struct Differ<T: ?Sized> {
    filters: Vec<Path>,
    settings: DiffSettings,
    _model: PhantomData<fn(&T)>,
}

impl<T: Serialize + ?Sized> Differ<T> {
    /// Compute the patch that transforms `original` into `updated`.
    pub fn diff_to_json_patch(
        &self,
        original: &T,
        updated: &T,
    ) -> Result<PatchDocument, WalkError> {
        let src = walk::to_value(original)?;
        let dst = walk::to_value(updated)?;
        diff_values(&src, &dst, &self.settings, &self.filters)
    }
}

// ── Core recursion ────────────────────────────────────────────────────────

fn is_filtered(path: &[String], filters: &[Path]) -> bool {
    filters.iter().any(|f| is_prefix(f, path))
}

fn diff_at_path(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &Value,
    dst: &Value,
    settings: &DiffSettings,
    filters: &[Path],
) {
    if is_filtered(path, filters) {
        return;
    }
    if src == dst {
        return;
    }
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d, settings, filters),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d, settings, filters),
        _ => {
            if !scalars_equal(src, dst, &settings.serializer) {
                ops.push(Op::Replace {
                    path: path.clone(),
                    value: dst.clone(),
                });
            }
        }
    }
}

fn diff_obj(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &Map<String, Value>,
    dst: &Map<String, Value>,
    settings: &DiffSettings,
    filters: &[Path],
) {
    // Removes first, so later operations never address dropped members.
    for key in src.keys() {
        if !dst.contains_key(key) {
            path.push(key.clone());
            if !is_filtered(path, filters) {
                ops.push(Op::Remove { path: path.clone() });
            }
            path.pop();
        }
    }
    for (key, dst_val) in dst {
        path.push(key.clone());
        match src.get(key) {
            None => {
                if !is_filtered(path, filters) {
                    ops.push(Op::Add {
                        path: path.clone(),
                        value: dst_val.clone(),
                    });
                }
            }
            Some(src_val) => diff_at_path(ops, path, src_val, dst_val, settings, filters),
        }
        path.pop();
    }
}

fn diff_arr(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &[Value],
    dst: &[Value],
    settings: &DiffSettings,
    filters: &[Path],
) {
    let common = src.len().min(dst.len());
    for i in 0..common {
        path.push(i.to_string());
        diff_at_path(ops, path, &src[i], &dst[i], settings, filters);
        path.pop();
    }
    // Trailing surplus on exactly one side: grow in order, shrink from the
    // end so indices stay valid as earlier operations apply.
    for i in common..dst.len() {
        path.push(i.to_string());
        if !is_filtered(path, filters) {
            ops.push(Op::Add {
                path: path.clone(),
                value: dst[i].clone(),
            });
        }
        path.pop();
    }
    for i in (common..src.len()).rev() {
        path.push(i.to_string());
        if !is_filtered(path, filters) {
            ops.push(Op::Remove { path: path.clone() });
        }
        path.pop();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
