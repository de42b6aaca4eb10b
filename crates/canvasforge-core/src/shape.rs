//! The shape record schema shared by every canvas operation.
//!
//! A [`Shape`] is a closed tagged union keyed on the JSON `"type"` field. Every
//! variant carries the same optional [`Style`] attributes, flattened into the
//! record, plus an `extra` map that keeps caller-side keys (ids, selection
//! flags) intact across operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};
use crate::geometry::Point;

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Drop shadow attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: String,
}

/// Visual attributes common to every shape variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// 0.0 (transparent) to 1.0 (opaque).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gradient: Option<bool>,
    /// Degrees; absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Keys this schema does not know about, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Style {
    pub fn colored(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }
}

/// `x`,`y` is the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(flatten)]
    pub style: Style,
}

/// Axis-aligned box geometry used by `rect` and `ellipse`; `x`,`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub style: Style,
}

/// A triangle in either bounding-box form or three-point form.
///
/// Renderers only understand the three-point form; see [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub style: Style,
}

/// Endpoint geometry used by `line` and `arrow`.
///
/// The optional `x`/`y` anchor is what layouts write to; it does not move the endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(flatten)]
    pub style: Style,
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// A synthesized table; `cells` is `rows × cols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub x: f64,
    pub y: f64,
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub cells: Vec<Vec<String>>,
    #[serde(flatten)]
    pub style: Style,
}

/// A drawable shape record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Circle(Circle),
    Rect(Frame),
    Ellipse(Frame),
    Triangle(Triangle),
    Polygon(Polygon),
    Line(Segment),
    Arrow(Segment),
    Text(Text),
    Table(Table),
}

impl Shape {
    // ── Constructors ─────────────────────────────────────────────────

    pub fn circle(x: f64, y: f64, radius: f64, color: &str) -> Self {
        Shape::Circle(Circle {
            x,
            y,
            radius,
            style: Style::colored(color),
        })
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, color: &str) -> Self {
        Shape::Rect(Frame {
            x,
            y,
            width,
            height,
            style: Style::colored(color),
        })
    }

    pub fn triangle(points: [Point; 3], color: &str) -> Self {
        Shape::Triangle(Triangle {
            points: Some(points.to_vec()),
            x: None,
            y: None,
            width: None,
            height: None,
            style: Style::colored(color),
        })
    }

    pub fn polygon(points: Vec<Point>, color: &str) -> Self {
        Shape::Polygon(Polygon {
            x: 0.0,
            y: 0.0,
            points,
            style: Style::colored(color),
        })
    }

    pub fn line(from: Point, to: Point, color: &str) -> Self {
        Shape::Line(Segment {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            width: None,
            dash: None,
            x: None,
            y: None,
            style: Style::colored(color),
        })
    }

    pub fn arrow(from: Point, to: Point, width: f64, color: &str) -> Self {
        Shape::Arrow(Segment {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            width: Some(width),
            dash: None,
            x: None,
            y: None,
            style: Style::colored(color),
        })
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, font_size: f64, color: &str) -> Self {
        Shape::Text(Text {
            x,
            y,
            text: text.into(),
            font_size,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            style: Style::colored(color),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The wire `"type"` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "circle",
            Shape::Rect(_) => "rect",
            Shape::Ellipse(_) => "ellipse",
            Shape::Triangle(_) => "triangle",
            Shape::Polygon(_) => "polygon",
            Shape::Line(_) => "line",
            Shape::Arrow(_) => "arrow",
            Shape::Text(_) => "text",
            Shape::Table(_) => "table",
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            Shape::Circle(s) => &s.style,
            Shape::Rect(s) | Shape::Ellipse(s) => &s.style,
            Shape::Triangle(s) => &s.style,
            Shape::Polygon(s) => &s.style,
            Shape::Line(s) | Shape::Arrow(s) => &s.style,
            Shape::Text(s) => &s.style,
            Shape::Table(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut Style {
        match self {
            Shape::Circle(s) => &mut s.style,
            Shape::Rect(s) | Shape::Ellipse(s) => &mut s.style,
            Shape::Triangle(s) => &mut s.style,
            Shape::Polygon(s) => &mut s.style,
            Shape::Line(s) | Shape::Arrow(s) => &mut s.style,
            Shape::Text(s) => &mut s.style,
            Shape::Table(s) => &mut s.style,
        }
    }

    pub fn color(&self) -> Option<&str> {
        self.style().color.as_deref()
    }

    /// The shape's own `x`/`y` fields, each `None` when the variant has not set it.
    ///
    /// This is the raw field, not a rendered extent: a line reports its layout
    /// anchor, never its endpoints.
    pub fn xy(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Shape::Circle(s) => (Some(s.x), Some(s.y)),
            Shape::Rect(s) | Shape::Ellipse(s) => (Some(s.x), Some(s.y)),
            Shape::Triangle(s) => (s.x, s.y),
            Shape::Polygon(s) => (Some(s.x), Some(s.y)),
            Shape::Line(s) | Shape::Arrow(s) => (s.x, s.y),
            Shape::Text(s) => (Some(s.x), Some(s.y)),
            Shape::Table(s) => (Some(s.x), Some(s.y)),
        }
    }

    /// Overwrite the `x`/`y` fields and nothing else.
    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            Shape::Circle(s) => {
                s.x = x;
                s.y = y;
            }
            Shape::Rect(s) | Shape::Ellipse(s) => {
                s.x = x;
                s.y = y;
            }
            Shape::Triangle(s) => {
                s.x = Some(x);
                s.y = Some(y);
            }
            Shape::Polygon(s) => {
                s.x = x;
                s.y = y;
            }
            Shape::Line(s) | Shape::Arrow(s) => {
                s.x = Some(x);
                s.y = Some(y);
            }
            Shape::Text(s) => {
                s.x = x;
                s.y = y;
            }
            Shape::Table(s) => {
                s.x = x;
                s.y = y;
            }
        }
    }

    // ── Merging & validation ─────────────────────────────────────────

    /// Overlay `modifications` key by key onto this shape's JSON record.
    ///
    /// The merged record must still be a valid shape; on failure `self` is untouched.
    pub fn merge(&mut self, modifications: &Map<String, Value>) -> Result<()> {
        if modifications.is_empty() {
            return Ok(());
        }
        let merged = self.merged(modifications)?;
        *self = merged;
        Ok(())
    }

    /// Like [`Shape::merge`] but returns the merged copy.
    pub fn merged(&self, modifications: &Map<String, Value>) -> Result<Shape> {
        let mut record = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(EngineError::validation("Shape did not serialize to an object")),
            Err(e) => return Err(EngineError::validation(e.to_string())),
        };
        for (key, value) in modifications {
            record.insert(key.clone(), value.clone());
        }
        let merged: Shape = serde_json::from_value(Value::Object(record))
            .map_err(|e| EngineError::validation(format!("Invalid modifications: {}", e)))?;
        merged.validate()?;
        Ok(merged)
    }

    /// Check numeric fields are finite and variant-specific geometry is well formed.
    pub fn validate(&self) -> Result<()> {
        let finite = |name: &str, v: f64| -> Result<()> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(EngineError::validation(format!(
                    "{} field '{}' must be a finite number",
                    self.type_name(),
                    name
                )))
            }
        };

        match self {
            Shape::Circle(s) => {
                finite("x", s.x)?;
                finite("y", s.y)?;
                finite("radius", s.radius)?;
            }
            Shape::Rect(s) | Shape::Ellipse(s) => {
                finite("x", s.x)?;
                finite("y", s.y)?;
                finite("width", s.width)?;
                finite("height", s.height)?;
            }
            Shape::Triangle(s) => {
                match &s.points {
                    Some(points) if points.len() != 3 => {
                        return Err(EngineError::validation(
                            "triangle must have exactly 3 points",
                        ));
                    }
                    Some(points) => {
                        if !points.iter().all(Point::is_finite) {
                            return Err(EngineError::validation(
                                "triangle points must be finite numbers",
                            ));
                        }
                    }
                    None => {
                        if s.x.is_none() || s.y.is_none() || s.width.is_none() || s.height.is_none()
                        {
                            return Err(EngineError::validation(
                                "triangle needs either points or x, y, width and height",
                            ));
                        }
                    }
                }
                for (name, v) in [("x", s.x), ("y", s.y), ("width", s.width), ("height", s.height)] {
                    if let Some(v) = v {
                        finite(name, v)?;
                    }
                }
            }
            Shape::Polygon(s) => {
                finite("x", s.x)?;
                finite("y", s.y)?;
                if !s.points.iter().all(Point::is_finite) {
                    return Err(EngineError::validation(
                        "polygon points must be finite numbers",
                    ));
                }
            }
            Shape::Line(s) | Shape::Arrow(s) => {
                finite("x1", s.x1)?;
                finite("y1", s.y1)?;
                finite("x2", s.x2)?;
                finite("y2", s.y2)?;
            }
            Shape::Text(s) => {
                finite("x", s.x)?;
                finite("y", s.y)?;
                finite("fontSize", s.font_size)?;
            }
            Shape::Table(s) => {
                finite("x", s.x)?;
                finite("y", s.y)?;
                finite("cellWidth", s.cell_width)?;
                finite("cellHeight", s.cell_height)?;
                if s.cells.len() != s.rows || s.cells.iter().any(|row| row.len() != s.cols) {
                    return Err(EngineError::validation(
                        "table cells must match rows × cols",
                    ));
                }
            }
        }

        if let Some(opacity) = self.style().opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(EngineError::validation("opacity must be between 0 and 1"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_circle_wire_format() {
        let shape: Shape =
            serde_json::from_value(json!({"type": "circle", "x": 10, "y": 20, "radius": 5, "color": "#ff0000"}))
                .unwrap();
        assert_eq!(shape.type_name(), "circle");
        assert_eq!(shape.color(), Some("#ff0000"));
        assert_eq!(shape.xy(), (Some(10.0), Some(20.0)));

        let back = serde_json::to_value(&shape).unwrap();
        assert_eq!(back["type"], "circle");
        assert_eq!(back["radius"], 5.0);
        assert!(back.get("stroke").is_none());
    }

    #[test]
    fn test_style_attributes_are_camel_case() {
        let mut shape = Shape::rect(0.0, 0.0, 10.0, 10.0, "#000000");
        shape.style_mut().stroke_width = Some(2.0);
        shape.style_mut().has_gradient = Some(true);
        let v = serde_json::to_value(&shape).unwrap();
        assert_eq!(v["strokeWidth"], 2.0);
        assert_eq!(v["hasGradient"], true);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let shape: Shape = serde_json::from_value(
            json!({"type": "rect", "x": 0, "y": 0, "width": 4, "height": 4, "id": "abc"}),
        )
        .unwrap();
        assert_eq!(shape.style().extra.get("id"), Some(&json!("abc")));
        let v = serde_json::to_value(&shape).unwrap();
        assert_eq!(v["id"], "abc");
    }

    #[test]
    fn test_text_defaults_font() {
        let shape: Shape =
            serde_json::from_value(json!({"type": "text", "x": 1, "y": 2, "text": "hi"})).unwrap();
        match shape {
            Shape::Text(t) => {
                assert_eq!(t.font_size, DEFAULT_FONT_SIZE);
                assert_eq!(t.font_family, DEFAULT_FONT_FAMILY);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let res: std::result::Result<Shape, _> =
            serde_json::from_value(json!({"type": "hexagon", "x": 0, "y": 0}));
        assert!(res.is_err());
    }

    #[test]
    fn test_merge_overwrites_keys() {
        let mut shape = Shape::circle(0.0, 0.0, 5.0, "#ff0000");
        shape
            .merge(&obj(json!({"color": "#00ff00", "radius": 9, "label": "hub"})))
            .unwrap();
        match &shape {
            Shape::Circle(c) => {
                assert_eq!(c.radius, 9.0);
                assert_eq!(c.style.color.as_deref(), Some("#00ff00"));
                assert_eq!(c.style.extra.get("label"), Some(&json!("hub")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_merge_leaves_shape_untouched() {
        let mut shape = Shape::circle(0.0, 0.0, 5.0, "#ff0000");
        let before = shape.clone();
        assert!(shape.merge(&obj(json!({"radius": "big"}))).is_err());
        assert!(shape.merge(&obj(json!({"opacity": 3.0}))).is_err());
        assert_eq!(shape, before);
    }

    #[test]
    fn test_set_position_on_line_keeps_endpoints() {
        let mut line = Shape::line(Point::new(0.0, 0.0), Point::new(10.0, 10.0), "#000000");
        line.set_position(50.0, 60.0);
        match &line {
            Shape::Line(s) => {
                assert_eq!((s.x1, s.y1, s.x2, s.y2), (0.0, 0.0, 10.0, 10.0));
                assert_eq!((s.x, s.y), (Some(50.0), Some(60.0)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_triangle() {
        let shape: Shape =
            serde_json::from_value(json!({"type": "triangle", "x": 0, "y": 0})).unwrap();
        assert!(shape.validate().is_err());

        let two_points: Shape =
            serde_json::from_value(json!({"type": "triangle", "points": [[0, 0], [1, 1]]})).unwrap();
        assert!(two_points.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let shape = Shape::circle(f64::NAN, 0.0, 1.0, "#000000");
        assert!(matches!(shape.validate(), Err(EngineError::Validation(_))));
    }
}
