//! Operation categories and the in-place shape list editor.
//!
//! Canvas operations come in two kinds with different ownership contracts:
//!
//! - [`Transform`] reads a borrowed list and returns fresh output. The caller's
//!   list is never written, so transforms may share an input freely.
//! - [`Edit`] mutates a caller-owned list in place. Every edit validates its
//!   inputs before touching the list, so a failed edit leaves it unchanged.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};
use crate::group::{Group, ResolvedIndices};
use crate::shape::Shape;

/// A copy-on-write operation over a shape list.
pub trait Transform: std::fmt::Debug {
    type Output;
    /// Compute the result without modifying `shapes`.
    fn apply(&self, shapes: &[Shape]) -> Result<Self::Output>;
    /// Human-readable description for logs.
    fn description(&self) -> &str;
}

/// An in-place operation over a shape list.
pub trait Edit: std::fmt::Debug {
    type Output;
    /// Apply the edit to `shapes`; on error `shapes` is untouched.
    fn execute(&self, shapes: &mut Vec<Shape>) -> Result<Self::Output>;
    /// Human-readable description for logs.
    fn description(&self) -> &str;
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(EngineError::index(index, len))
    }
}

// ══════════════════════════════════════════════════════════════════════
// Concrete Edits
// ══════════════════════════════════════════════════════════════════════

/// Merge modifications into the shape at `index`.
#[derive(Debug, Clone)]
pub struct ModifyShapeCommand {
    pub index: usize,
    pub modifications: Map<String, Value>,
}

impl ModifyShapeCommand {
    pub fn new(index: usize, modifications: Map<String, Value>) -> Self {
        Self {
            index,
            modifications,
        }
    }
}

impl Edit for ModifyShapeCommand {
    /// The shape after modification.
    type Output = Shape;

    fn execute(&self, shapes: &mut Vec<Shape>) -> Result<Shape> {
        check_index(self.index, shapes.len())?;
        let target = &mut shapes[self.index];
        target.merge(&self.modifications)?;
        log::info!(
            "Modified shape {} ({} keys)",
            self.index,
            self.modifications.len()
        );
        Ok(target.clone())
    }

    fn description(&self) -> &str {
        "Modify shape"
    }
}

/// Remove the shape at `index`; later shapes shift down by one.
#[derive(Debug, Clone)]
pub struct DeleteShapeCommand {
    pub index: usize,
}

impl DeleteShapeCommand {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Edit for DeleteShapeCommand {
    /// The removed shape.
    type Output = Shape;

    fn execute(&self, shapes: &mut Vec<Shape>) -> Result<Shape> {
        check_index(self.index, shapes.len())?;
        let removed = shapes.remove(self.index);
        log::info!(
            "Deleted {} at index {}, {} shapes remain",
            removed.type_name(),
            self.index,
            shapes.len()
        );
        Ok(removed)
    }

    fn description(&self) -> &str {
        "Delete shape"
    }
}

/// Merge the same modifications into every in-range member of a group.
#[derive(Debug, Clone)]
pub struct ModifyGroupCommand {
    pub group: Group,
    pub modifications: Map<String, Value>,
}

impl ModifyGroupCommand {
    pub fn new(group: Group, modifications: Map<String, Value>) -> Self {
        Self {
            group,
            modifications,
        }
    }
}

impl Edit for ModifyGroupCommand {
    type Output = ResolvedIndices;

    fn execute(&self, shapes: &mut Vec<Shape>) -> Result<ResolvedIndices> {
        let resolved = self.group.resolve(shapes.len());
        if !resolved.stale.is_empty() {
            log::warn!(
                "Group '{}' has {} stale indices: {:?}",
                self.group.id,
                resolved.stale.len(),
                resolved.stale
            );
        }

        // Merge into copies first so one bad merge cannot leave the list half edited.
        let merged = resolved
            .valid
            .iter()
            .map(|&idx| shapes[idx].merged(&self.modifications))
            .collect::<Result<Vec<_>>>()?;
        for (&idx, shape) in resolved.valid.iter().zip(merged) {
            shapes[idx] = shape;
        }

        log::info!(
            "Modified {} shapes in group '{}'",
            resolved.valid.len(),
            self.group.id
        );
        Ok(resolved)
    }

    fn description(&self) -> &str {
        "Modify group"
    }
}

// ══════════════════════════════════════════════════════════════════════
// Read-only listing
// ══════════════════════════════════════════════════════════════════════

/// Snapshot of a shape list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeListing {
    pub shapes: Vec<Shape>,
    pub count: usize,
    /// Distinct type tags, sorted.
    pub types: Vec<String>,
}

pub fn list_shapes(shapes: &[Shape]) -> ShapeListing {
    let types: BTreeSet<&str> = shapes.iter().map(Shape::type_name).collect();
    ShapeListing {
        shapes: shapes.to_vec(),
        count: shapes.len(),
        types: types.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mods(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn sample() -> Vec<Shape> {
        vec![
            Shape::circle(10.0, 10.0, 5.0, "#ff0000"),
            Shape::rect(0.0, 0.0, 20.0, 10.0, "#00ff00"),
            Shape::circle(50.0, 50.0, 8.0, "#0000ff"),
        ]
    }

    #[test]
    fn test_modify_every_valid_index() {
        for i in 0..3 {
            let mut shapes = sample();
            let cmd = ModifyShapeCommand::new(i, mods(json!({"color": "#fff"})));
            let updated = cmd.execute(&mut shapes).unwrap();
            assert_eq!(updated.color(), Some("#fff"));
            assert_eq!(shapes[i].color(), Some("#fff"));
            assert_eq!(shapes.len(), 3);
        }
    }

    #[test]
    fn test_modify_out_of_range_leaves_list() {
        let mut shapes = sample();
        let before = shapes.clone();
        let cmd = ModifyShapeCommand::new(3, mods(json!({"color": "#fff"})));
        assert_eq!(
            cmd.execute(&mut shapes),
            Err(EngineError::Index { index: 3, len: 3 })
        );
        assert_eq!(shapes, before);
    }

    #[test]
    fn test_delete_shifts_later_shapes() {
        let mut shapes = sample();
        let before = shapes.clone();
        let removed = DeleteShapeCommand::new(1).execute(&mut shapes).unwrap();
        assert_eq!(removed, before[1]);
        assert_eq!(shapes, vec![before[0].clone(), before[2].clone()]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut shapes: Vec<Shape> = Vec::new();
        assert!(matches!(
            DeleteShapeCommand::new(0).execute(&mut shapes),
            Err(EngineError::Index { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_group_modify_skips_stale_indices() {
        let mut shapes = sample();
        let group = Group::new("g", vec![0, -1, 2, 9]);
        let cmd = ModifyGroupCommand::new(group, mods(json!({"opacity": 0.5})));
        let resolved = cmd.execute(&mut shapes).unwrap();
        assert_eq!(resolved.valid, vec![0, 2]);
        assert_eq!(resolved.stale, vec![-1, 9]);
        assert_eq!(shapes[0].style().opacity, Some(0.5));
        assert_eq!(shapes[1].style().opacity, None);
        assert_eq!(shapes[2].style().opacity, Some(0.5));
    }

    #[test]
    fn test_group_modify_is_all_or_nothing() {
        let mut shapes = sample();
        let before = shapes.clone();
        // An unknown key on the circle, but a malformed width on the rect.
        let cmd = ModifyGroupCommand::new(
            Group::new("g", vec![0, 1]),
            mods(json!({"width": "wide"})),
        );
        assert!(cmd.execute(&mut shapes).is_err());
        assert_eq!(shapes, before);
    }

    #[test]
    fn test_list_shapes() {
        let listing = list_shapes(&sample());
        assert_eq!(listing.count, 3);
        assert_eq!(listing.types, vec!["circle", "rect"]);
    }
}
