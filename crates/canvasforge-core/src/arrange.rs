//! Repositioning an existing shape list into a named layout.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::commands::Transform;
use crate::error::{EngineError, Result};
use crate::geometry::Point;
use crate::shape::Shape;

/// Columns used by the grid layout.
pub const GRID_COLUMNS: usize = 3;

pub const GRID_LINE_COLOR: &str = "#e5e7eb";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Horizontal,
    Vertical,
    Grid,
    Circle,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
            Layout::Grid => "grid",
            Layout::Circle => "circle",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(Layout::Horizontal),
            "vertical" => Ok(Layout::Vertical),
            "grid" => Ok(Layout::Grid),
            "circle" => Ok(Layout::Circle),
            other => Err(EngineError::validation(format!(
                "Unknown arrangement type '{}'",
                other
            ))),
        }
    }
}

/// Result of an arrangement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrangement {
    pub shapes: Vec<Shape>,
    pub layout: Layout,
    pub spacing: f64,
    /// Guide lines for the grid layout; empty otherwise. Never part of `shapes`.
    pub grid_lines: Vec<Shape>,
}

/// Arrange shapes into a layout spanning the canvas.
///
/// Only `x`/`y` are overwritten. Shapes whose geometry is not anchored at
/// `x`/`y` (lines, arrows, point-form triangles) receive the anchor but their
/// vertices stay where they were.
#[derive(Debug, Clone)]
pub struct ArrangeShapes {
    pub layout: Layout,
    /// Echoed in the result; the layouts divide the full canvas evenly.
    pub spacing: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl ArrangeShapes {
    pub fn new(layout: Layout, spacing: f64, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            layout,
            spacing,
            canvas_width,
            canvas_height,
        }
    }

    /// Center position of shape `i` out of `n`.
    pub fn position(&self, i: usize, n: usize) -> Point {
        let (w, h) = (self.canvas_width, self.canvas_height);
        match self.layout {
            Layout::Horizontal => {
                let cell_width = w / n as f64;
                Point::new((i as f64 + 0.5) * cell_width, h / 2.0)
            }
            Layout::Vertical => {
                let cell_height = h / n as f64;
                Point::new(w / 2.0, (i as f64 + 0.5) * cell_height)
            }
            Layout::Grid => {
                let (rows, cols) = grid_dimensions(n);
                let cell_width = w / cols as f64;
                let cell_height = h / rows as f64;
                let row = i / cols;
                let col = i % cols;
                Point::new(
                    col as f64 * cell_width + cell_width / 2.0,
                    row as f64 * cell_height + cell_height / 2.0,
                )
            }
            Layout::Circle => {
                let center = Point::new(w / 2.0, h / 2.0);
                let radius = w.min(h) / 3.0;
                let angle = i as f64 / n as f64 * 2.0 * PI;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            }
        }
    }

    /// `cols + 1` vertical then `rows + 1` horizontal lines over the whole canvas.
    fn grid_lines(&self, n: usize) -> Vec<Shape> {
        let (rows, cols) = grid_dimensions(n);
        let (w, h) = (self.canvas_width, self.canvas_height);
        let cell_width = w / cols as f64;
        let cell_height = h / rows as f64;

        let vertical = (0..=cols).map(|c| {
            let x = c as f64 * cell_width;
            Point::new(x, 0.0)..Point::new(x, h)
        });
        let horizontal = (0..=rows).map(|r| {
            let y = r as f64 * cell_height;
            Point::new(0.0, y)..Point::new(w, y)
        });

        vertical
            .chain(horizontal)
            .map(|span| {
                let mut line = Shape::line(span.start, span.end, GRID_LINE_COLOR);
                line.style_mut().stroke_width = Some(1.0);
                line
            })
            .collect()
    }
}

/// `(rows, cols)` of the grid layout for `n` shapes.
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    let cols = GRID_COLUMNS;
    (n.div_ceil(cols).max(1), cols)
}

impl Transform for ArrangeShapes {
    type Output = Arrangement;

    fn apply(&self, shapes: &[Shape]) -> Result<Arrangement> {
        if shapes.is_empty() {
            return Err(EngineError::validation("No shapes to arrange"));
        }
        if !(self.canvas_width.is_finite() && self.canvas_height.is_finite()) {
            return Err(EngineError::validation("Canvas dimensions must be finite"));
        }

        let n = shapes.len();
        let mut arranged = shapes.to_vec();
        for (i, shape) in arranged.iter_mut().enumerate() {
            let p = self.position(i, n);
            shape.set_position(p.x, p.y);
        }

        let grid_lines = match self.layout {
            Layout::Grid => self.grid_lines(n),
            _ => Vec::new(),
        };

        log::info!("Arranged {} shapes in {} layout", n, self.layout);
        Ok(Arrangement {
            shapes: arranged,
            layout: self.layout,
            spacing: self.spacing,
            grid_lines,
        })
    }

    fn description(&self) -> &str {
        "Arrange shapes"
    }
}
