//! Deterministic decorative patterns (checkerboard, dots, wave) centred
//! on the canvas.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use canvasforge_core::geometry::Point;
use canvasforge_core::{EngineError, Result, Shape};

/// Side length of a checkerboard cell.
pub const CHECKER_CELL: f64 = 50.0;
pub const CHECKER_COLORS: [&str; 2] = ["#000000", "#ffffff"];

pub const DOT_RADIUS: f64 = 10.0;
/// Radius of the ring the dots sit on.
pub const DOT_RING_RADIUS: f64 = 150.0;

pub const WAVE_DOT_RADIUS: f64 = 8.0;
pub const WAVE_AMPLITUDE: f64 = 50.0;
pub const WAVE_COLOR: &str = "#2563eb";

/// Upper bound on `count`; a checkerboard emits `count²` shapes.
pub const MAX_PATTERN_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Checkerboard,
    Dots,
    Wave,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternKind::Checkerboard => "checkerboard",
            PatternKind::Dots => "dots",
            PatternKind::Wave => "wave",
        };
        f.write_str(name)
    }
}

impl FromStr for PatternKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "checkerboard" => Ok(PatternKind::Checkerboard),
            "dots" => Ok(PatternKind::Dots),
            "wave" => Ok(PatternKind::Wave),
            other => Err(EngineError::validation(format!(
                "Unknown pattern type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub pattern_type: PatternKind,
    pub count: usize,
    pub shapes: Vec<Shape>,
}

/// Build a pattern from scratch. Same inputs, same output.
pub fn generate_pattern(
    kind: PatternKind,
    count: usize,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Pattern> {
    if count == 0 {
        return Err(EngineError::computation("Pattern count must be at least 1"));
    }
    if count > MAX_PATTERN_COUNT {
        return Err(EngineError::validation(format!(
            "Pattern count {} exceeds the maximum of {}",
            count, MAX_PATTERN_COUNT
        )));
    }
    let center = Point::new(canvas_width / 2.0, canvas_height / 2.0);

    let shapes = match kind {
        PatternKind::Checkerboard => checkerboard(count, center),
        PatternKind::Dots => dots(count, center),
        PatternKind::Wave => wave(count, canvas_width, center.y),
    };

    log::info!("Generated {} pattern with {} shapes", kind, shapes.len());
    Ok(Pattern {
        pattern_type: kind,
        count,
        shapes,
    })
}

/// `count × count` cells centered on the canvas.
fn checkerboard(count: usize, center: Point) -> Vec<Shape> {
    let side = count as f64 * CHECKER_CELL;
    let origin = Point::new(center.x - side / 2.0, center.y - side / 2.0);
    let mut shapes = Vec::with_capacity(count * count);
    for i in 0..count {
        for j in 0..count {
            shapes.push(Shape::rect(
                origin.x + j as f64 * CHECKER_CELL,
                origin.y + i as f64 * CHECKER_CELL,
                CHECKER_CELL,
                CHECKER_CELL,
                CHECKER_COLORS[(i + j) % 2],
            ));
        }
    }
    shapes
}

fn dots(count: usize, center: Point) -> Vec<Shape> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * 2.0 * PI;
            let red = i * 255 / count;
            Shape::circle(
                center.x + DOT_RING_RADIUS * angle.cos(),
                center.y + DOT_RING_RADIUS * angle.sin(),
                DOT_RADIUS,
                &format!("#{:02x}64c8", red),
            )
        })
        .collect()
}

/// One sine period across the canvas width.
fn wave(count: usize, canvas_width: f64, mid_y: f64) -> Vec<Shape> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            Shape::circle(
                t * canvas_width,
                mid_y + WAVE_AMPLITUDE * (2.0 * PI * t).sin(),
                WAVE_DOT_RADIUS,
                WAVE_COLOR,
            )
        })
        .collect()
}
