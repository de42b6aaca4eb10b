//! Triangle normalization.
//!
//! Externally generated triangles arrive in bounding-box form (`x`, `y`,
//! `width`, `height`). Renderers need three explicit vertices, so every shape
//! list that may contain generated shapes passes through [`normalize_shapes`]
//! before it leaves the engine.

use crate::geometry::Point;
use crate::shape::{Shape, Triangle};

/// Convert a bounding-box triangle into its three-point form in place.
///
/// Top-center, bottom-left, bottom-right. The box fields are dropped
/// afterwards. A triangle that already has `points`, or lacks a complete box,
/// is left alone, so applying this twice is the same as applying it once.
pub fn normalize_triangle(tri: &mut Triangle) -> bool {
    if tri.points.is_some() {
        return false;
    }
    let (Some(x), Some(y), Some(width), Some(height)) = (tri.x, tri.y, tri.width, tri.height)
    else {
        return false;
    };

    tri.points = Some(vec![
        Point::new(x + width / 2.0, y),
        Point::new(x, y + height),
        Point::new(x + width, y + height),
    ]);
    tri.x = None;
    tri.y = None;
    tri.width = None;
    tri.height = None;
    true
}

/// Normalize a single shape; non-triangles pass through unchanged.
pub fn normalize_shape(shape: &mut Shape) -> bool {
    match shape {
        Shape::Triangle(tri) => normalize_triangle(tri),
        _ => false,
    }
}

/// Normalize every shape in the list, returning how many were converted.
pub fn normalize_shapes(shapes: &mut [Shape]) -> usize {
    let converted = shapes.iter_mut().map(normalize_shape).filter(|&c| c).count();
    if converted > 0 {
        log::debug!("Normalized {} bounding-box triangles", converted);
    }
    converted
}
