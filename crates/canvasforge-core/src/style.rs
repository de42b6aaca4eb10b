//! Visual style presets and filtered batch modification.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::commands::Transform;
use crate::error::{EngineError, Result};
use crate::shape::{Shadow, Shape, Style};

const NEON_FALLBACK_COLOR: &str = "#0000ff";

/// Named style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    Shadow,
    Outline,
    Neon,
    Glass,
    Gradient,
}

impl VisualStyle {
    /// `None` for names outside the preset list.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shadow" => Some(VisualStyle::Shadow),
            "outline" => Some(VisualStyle::Outline),
            "neon" => Some(VisualStyle::Neon),
            "glass" => Some(VisualStyle::Glass),
            "gradient" => Some(VisualStyle::Gradient),
            _ => None,
        }
    }

    /// Overlay this preset's attributes onto `style`.
    pub fn overlay(&self, style: &mut Style) {
        match self {
            VisualStyle::Shadow => {
                style.shadow = Some(Shadow {
                    offset_x: 4.0,
                    offset_y: 4.0,
                    blur: 8.0,
                    color: "#00000044".to_string(),
                });
            }
            VisualStyle::Outline => {
                style.stroke = Some("#000000".to_string());
                style.stroke_width = Some(2.0);
            }
            VisualStyle::Neon => {
                let glow = style
                    .color
                    .clone()
                    .unwrap_or_else(|| NEON_FALLBACK_COLOR.to_string());
                style.shadow = Some(Shadow {
                    offset_x: 0.0,
                    offset_y: 0.0,
                    blur: 20.0,
                    color: glow,
                });
                style.opacity = Some(0.9);
            }
            VisualStyle::Glass => {
                style.opacity = Some(0.3);
                style.stroke = Some("#ffffff".to_string());
                style.stroke_width = Some(1.0);
            }
            VisualStyle::Gradient => {
                style.has_gradient = Some(true);
            }
        }
    }
}

impl fmt::Display for VisualStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VisualStyle::Shadow => "shadow",
            VisualStyle::Outline => "outline",
            VisualStyle::Neon => "neon",
            VisualStyle::Glass => "glass",
            VisualStyle::Gradient => "gradient",
        };
        f.write_str(name)
    }
}

/// Apply a named style preset to a copy of every shape.
///
/// Unknown style names produce an unchanged copy.
#[derive(Debug, Clone)]
pub struct ApplyStyle {
    pub style: String,
}

impl ApplyStyle {
    pub fn new(style: &str) -> Self {
        Self {
            style: style.to_string(),
        }
    }
}

impl Transform for ApplyStyle {
    type Output = Vec<Shape>;

    fn apply(&self, shapes: &[Shape]) -> Result<Vec<Shape>> {
        let mut styled = shapes.to_vec();
        match VisualStyle::from_name(&self.style) {
            Some(preset) => {
                for shape in &mut styled {
                    preset.overlay(shape.style_mut());
                }
                log::info!("Applied {} style to {} shapes", preset, styled.len());
            }
            None => log::warn!("Unknown style '{}', shapes left unchanged", self.style),
        }
        Ok(styled)
    }

    fn description(&self) -> &str {
        "Apply style"
    }
}

/// Shape selector for batch operations: `all`, `type:<T>` or `color:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeFilter {
    All,
    Type(String),
    Color(String),
}

impl ShapeFilter {
    pub fn matches(&self, shape: &Shape) -> bool {
        match self {
            ShapeFilter::All => true,
            ShapeFilter::Type(t) => shape.type_name() == t,
            ShapeFilter::Color(c) => shape
                .color()
                .is_some_and(|color| color.eq_ignore_ascii_case(c)),
        }
    }
}

impl FromStr for ShapeFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "all" {
            return Ok(ShapeFilter::All);
        }
        match s.split_once(':') {
            Some(("type", t)) if !t.is_empty() => Ok(ShapeFilter::Type(t.to_string())),
            Some(("color", c)) if !c.is_empty() => Ok(ShapeFilter::Color(c.to_string())),
            _ => Err(EngineError::validation(format!(
                "Invalid filter '{}': expected 'all', 'type:<type>' or 'color:<hex>'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub shapes: Vec<Shape>,
    pub shapes_modified: usize,
}

/// Merge modifications into a copy of every shape the filter selects.
#[derive(Debug, Clone)]
pub struct BatchModify {
    pub filter: ShapeFilter,
    pub modifications: Map<String, Value>,
}

impl BatchModify {
    pub fn new(filter: ShapeFilter, modifications: Map<String, Value>) -> Self {
        Self {
            filter,
            modifications,
        }
    }
}

impl Transform for BatchModify {
    type Output = BatchResult;

    fn apply(&self, shapes: &[Shape]) -> Result<BatchResult> {
        let mut modified = 0;
        let shapes = shapes
            .iter()
            .map(|shape| {
                if self.filter.matches(shape) {
                    modified += 1;
                    shape.merged(&self.modifications)
                } else {
                    Ok(shape.clone())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Batch modified {} of {} shapes", modified, shapes.len());
        Ok(BatchResult {
            shapes,
            shapes_modified: modified,
        })
    }

    fn description(&self) -> &str {
        "Batch modify"
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

    #[test]
    fn test_shadow_preset() {
        let shapes = vec![Shape::circle(0.0, 0.0, 5.0, "#ff0000")];
        let out = ApplyStyle::new("shadow").apply(&shapes).unwrap();
        let shadow = out[0].style().shadow.as_ref().unwrap();
        assert_eq!((shadow.offset_x, shadow.offset_y, shadow.blur), (4.0, 4.0, 8.0));
        assert_eq!(shadow.color, "#00000044");
        assert!(shapes[0].style().shadow.is_none());
    }

    #[test]
    fn test_neon_uses_shape_color_or_blue() {
        let mut uncolored = Shape::circle(0.0, 0.0, 5.0, "#ff0000");
        uncolored.style_mut().color = None;
        let shapes = vec![Shape::circle(0.0, 0.0, 5.0, "#ff0000"), uncolored];
        let out = ApplyStyle::new("neon").apply(&shapes).unwrap();
        assert_eq!(out[0].style().shadow.as_ref().unwrap().color, "#ff0000");
        assert_eq!(out[1].style().shadow.as_ref().unwrap().color, "#0000ff");
        assert_eq!(out[0].style().opacity, Some(0.9));
    }

    #[test]
    fn test_outline_glass_gradient() {
        let shapes = vec![Shape::rect(0.0, 0.0, 1.0, 1.0, "#123456")];
        let outline = ApplyStyle::new("outline").apply(&shapes).unwrap();
        assert_eq!(outline[0].style().stroke.as_deref(), Some("#000000"));
        assert_eq!(outline[0].style().stroke_width, Some(2.0));

        let glass = ApplyStyle::new("glass").apply(&shapes).unwrap();
        assert_eq!(glass[0].style().opacity, Some(0.3));
        assert_eq!(glass[0].style().stroke.as_deref(), Some("#ffffff"));
        assert_eq!(glass[0].style().stroke_width, Some(1.0));

        let gradient = ApplyStyle::new("gradient").apply(&shapes).unwrap();
        assert_eq!(gradient[0].style().has_gradient, Some(true));
    }

    #[test]
    fn test_unknown_style_is_noop() {
        let shapes = vec![Shape::circle(0.0, 0.0, 5.0, "#ff0000")];
        assert_eq!(ApplyStyle::new("sparkle").apply(&shapes).unwrap(), shapes);
    }

    #[test]
    fn test_batch_modify_by_type() {
        let shapes = vec![
            Shape::circle(0.0, 0.0, 5.0, "#f00"),
            Shape::rect(0.0, 0.0, 1.0, 1.0, "#0f0"),
        ];
        let filter: ShapeFilter = "type:circle".parse().unwrap();
        let out = BatchModify::new(filter, mods(json!({"color": "#00f"})))
            .apply(&shapes)
            .unwrap();
        assert_eq!(out.shapes_modified, 1);
        assert_eq!(out.shapes[0].color(), Some("#00f"));
        assert_eq!(out.shapes[1], shapes[1]);
    }

    #[test]
    fn test_batch_modify_by_color_and_all() {
        let shapes = vec![
            Shape::circle(0.0, 0.0, 5.0, "#FF0000"),
            Shape::rect(0.0, 0.0, 1.0, 1.0, "#00ff00"),
        ];
        let by_color = BatchModify::new(
            "color:#ff0000".parse().unwrap(),
            mods(json!({"opacity": 0.5})),
        )
        .apply(&shapes)
        .unwrap();
        assert_eq!(by_color.shapes_modified, 1);

        let all = BatchModify::new(ShapeFilter::All, mods(json!({"rotation": 45})))
            .apply(&shapes)
            .unwrap();
        assert_eq!(all.shapes_modified, 2);
        assert!(all.shapes.iter().all(|s| s.style().rotation == Some(45.0)));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<ShapeFilter>().unwrap(), ShapeFilter::All);
        assert!("shape:circle".parse::<ShapeFilter>().is_err());
        assert!("type:".parse::<ShapeFilter>().is_err());
    }
}
