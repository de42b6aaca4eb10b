//! Selection groups owned by the UI, referring to shapes by position.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A UI-side selection group: positions into a caller-owned shape list.
///
/// The indices are weak. Any insert or delete on the referenced list can make
/// them point at different shapes, so they are resolved against the list
/// immediately before each use and never cached. They are signed because the
/// UI may send any integer; negatives simply never resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub object_indices: Vec<i64>,
}

/// Indices of a group checked against a concrete list length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedIndices {
    /// In-range indices in group order, duplicates removed.
    pub valid: Vec<usize>,
    /// Indices that fell outside the list, negatives included.
    pub stale: Vec<i64>,
}

impl Group {
    pub fn new(name: &str, object_indices: Vec<i64>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            object_indices,
        }
    }

    pub fn resolve(&self, len: usize) -> ResolvedIndices {
        let mut resolved = ResolvedIndices::default();
        for &idx in &self.object_indices {
            match usize::try_from(idx) {
                Ok(i) if i < len => {
                    if !resolved.valid.contains(&i) {
                        resolved.valid.push(i);
                    }
                }
                _ => resolved.stale.push(idx),
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group_gets_uuid() {
        let a = Group::new("logo", vec![0, 1]);
        let b = Group::new("logo", vec![0, 1]);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_resolve_splits_stale_indices() {
        let group = Group::new("g", vec![3, 0, 7, 0, 2]);
        let resolved = group.resolve(4);
        assert_eq!(resolved.valid, vec![3, 0, 2]);
        assert_eq!(resolved.stale, vec![7]);
    }

    #[test]
    fn test_negative_indices_are_stale() {
        let group: Group =
            serde_json::from_str(r#"{"id": "g1", "objectIndices": [0, -1, 2]}"#).unwrap();
        let resolved = group.resolve(3);
        assert_eq!(resolved.valid, vec![0, 2]);
        assert_eq!(resolved.stale, vec![-1]);
    }

    #[test]
    fn test_wire_format() {
        let group: Group =
            serde_json::from_str(r#"{"id": "g1", "objectIndices": [1, 2]}"#).unwrap();
        assert_eq!(group.object_indices, vec![1, 2]);
        assert!(group.name.is_empty());
    }
}
