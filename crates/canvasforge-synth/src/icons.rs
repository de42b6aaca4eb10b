//! Static icon registry: name → shape composition inside a `size × size` box.

use serde::Serialize;

use canvasforge_core::geometry::Point;
use canvasforge_core::{EngineError, Result, Shape};

pub const FALLBACK_ICON: &str = "circle";

type IconBuilder = fn(f64, &str) -> Vec<Shape>;

static ICONS: &[(&str, IconBuilder)] = &[
    ("heart", heart),
    ("star", star),
    ("arrow", arrow),
    ("circle", circle),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    /// Registry name actually used; differs from the request on fallback.
    pub icon: &'static str,
    pub size: f64,
    pub color: String,
    pub shapes: Vec<Shape>,
}

pub fn names() -> impl Iterator<Item = &'static str> {
    ICONS.iter().map(|(name, _)| *name)
}

/// Look up `name`, falling back to the circle icon for unknown names.
pub fn icon(name: &str, size: f64, color: &str) -> Result<Icon> {
    if !size.is_finite() || size <= 0.0 {
        return Err(EngineError::validation("Icon size must be a positive number"));
    }

    let (resolved, build) = match ICONS.iter().find(|(n, _)| *n == name) {
        Some(&(n, build)) => (n, build),
        None => {
            log::warn!(
                "Unknown icon '{}', using '{}' (known: {})",
                name,
                FALLBACK_ICON,
                names().collect::<Vec<_>>().join(", ")
            );
            (FALLBACK_ICON, circle as IconBuilder)
        }
    };

    Ok(Icon {
        icon: resolved,
        size,
        color: color.to_string(),
        shapes: build(size, color),
    })
}

fn circle(size: f64, color: &str) -> Vec<Shape> {
    vec![Shape::circle(size / 2.0, size / 2.0, size / 2.0, color)]
}

/// Two lobes over a downward triangle.
fn heart(size: f64, color: &str) -> Vec<Shape> {
    let lobe = size * 0.25;
    vec![
        Shape::circle(size * 0.3, size * 0.35, lobe, color),
        Shape::circle(size * 0.7, size * 0.35, lobe, color),
        Shape::triangle(
            [
                Point::new(size * 0.06, size * 0.45),
                Point::new(size * 0.94, size * 0.45),
                Point::new(size * 0.5, size * 0.95),
            ],
            color,
        ),
    ]
}

/// Five-pointed star, first tip straight up.
fn star(size: f64, color: &str) -> Vec<Shape> {
    let center = Point::new(size / 2.0, size / 2.0);
    let points = (0..10)
        .map(|k| {
            let r = if k % 2 == 0 { size / 2.0 } else { size / 5.0 };
            center.polar(r, -90.0 + k as f64 * 36.0)
        })
        .collect();
    vec![Shape::polygon(points, color)]
}

fn arrow(size: f64, color: &str) -> Vec<Shape> {
    vec![Shape::arrow(
        Point::new(0.0, size / 2.0),
        Point::new(size, size / 2.0),
        size / 10.0,
        color,
    )]
}
