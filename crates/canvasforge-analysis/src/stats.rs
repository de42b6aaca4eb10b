use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use canvasforge_core::geometry::{BBox, Point};
use canvasforge_core::Shape;

/// Extent of the shapes' `x`/`y` fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<BBox> for BoundingBox {
    fn from(bb: BBox) -> Self {
        Self {
            min_x: bb.min.x,
            min_y: bb.min.y,
            max_x: bb.max.x,
            max_y: bb.max.y,
            width: bb.width(),
            height: bb.height(),
        }
    }
}

/// Aggregate statistics over a shape list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasStats {
    pub total_shapes: usize,
    /// Count per type tag.
    pub shape_types: BTreeMap<String, usize>,
    /// Distinct colors in first-seen order.
    pub colors_used: Vec<String>,
    /// `None` for an empty canvas.
    pub bounding_box: Option<BoundingBox>,
}

/// Summarize a shape list.
///
/// The bounding box reads each shape's own `x`/`y` field only, with a missing
/// field counted as 0. It is not the rendered extent: a line contributes its
/// layout anchor (or the origin), never its endpoints, and a circle its center.
pub fn analyze(shapes: &[Shape]) -> CanvasStats {
    let mut shape_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut colors_used: Vec<String> = Vec::new();
    let mut anchors = Vec::with_capacity(shapes.len());

    for shape in shapes {
        *shape_types.entry(shape.type_name().to_string()).or_default() += 1;

        if let Some(color) = shape.color() {
            if !colors_used.iter().any(|c| c == color) {
                colors_used.push(color.to_string());
            }
        }

        let (x, y) = shape.xy();
        anchors.push(Point::new(x.unwrap_or(0.0), y.unwrap_or(0.0)));
    }

    let stats = CanvasStats {
        total_shapes: shapes.len(),
        shape_types,
        colors_used,
        bounding_box: BBox::from_points(&anchors).map(BoundingBox::from),
    };
    log::info!(
        "Analyzed {} shapes: {} types, {} colors",
        stats.total_shapes,
        stats.shape_types.len(),
        stats.colors_used.len()
    );
    stats
}
