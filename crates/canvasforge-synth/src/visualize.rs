//! Tables, bar charts and pie charts built out of plain shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use canvasforge_core::geometry::Point;
use canvasforge_core::palette;
use canvasforge_core::shape::{Style, Table};
use canvasforge_core::{EngineError, Result, Shape};

pub const TABLE_ORIGIN: Point = Point { x: 50.0, y: 50.0 };
pub const TABLE_MAX_CELL_WIDTH: f64 = 150.0;
pub const TABLE_CELL_HEIGHT: f64 = 40.0;

pub const CHART_MARGIN_LEFT: f64 = 100.0;
pub const CHART_MARGIN_TOP: f64 = 150.0;

const LABEL_COLOR: &str = "#374151";
const AXIS_COLOR: &str = "#111827";
const LABEL_FONT_SIZE: f64 = 12.0;
const PIE_LABEL_FONT_SIZE: f64 = 14.0;
/// Distance past the rim where pie labels sit.
const PIE_LABEL_OFFSET: f64 = 50.0;
/// Pie first segment starts at 12 o'clock.
const PIE_START_ANGLE: f64 = -90.0;

/// Structured input: `headers`/`rows` for tables, `labels`/`values` for charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Numbers and other scalars are accepted and shown as text.
    pub labels: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VizType {
    Table,
    BarChart,
    PieChart,
}

impl fmt::Display for VizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VizType::Table => "table",
            VizType::BarChart => "bar_chart",
            VizType::PieChart => "pie_chart",
        };
        f.write_str(name)
    }
}

impl FromStr for VizType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(VizType::Table),
            "bar_chart" => Ok(VizType::BarChart),
            "pie_chart" => Ok(VizType::PieChart),
            other => Err(EngineError::validation(format!(
                "Unknown visualization type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
    /// Degrees.
    pub angle: f64,
    /// Truncated to an integer.
    pub percent: i64,
    pub triangles: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visualization {
    pub viz_type: VizType,
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bars: Vec<Bar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<PieSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_height: Option<f64>,
}

impl Visualization {
    fn new(viz_type: VizType, shapes: Vec<Shape>) -> Self {
        Self {
            viz_type,
            shapes,
            bars: Vec::new(),
            segments: Vec::new(),
            chart_height: None,
        }
    }
}

pub fn synthesize(
    data: &VisualizationData,
    viz_type: VizType,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Visualization> {
    let viz = match viz_type {
        VizType::Table => table(data, canvas_width)?,
        VizType::BarChart => bar_chart(data, canvas_width, canvas_height)?,
        VizType::PieChart => pie_chart(data, canvas_width, canvas_height)?,
    };
    log::info!("Synthesized {} from {} shapes", viz_type, viz.shapes.len());
    Ok(viz)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn table(data: &VisualizationData, canvas_width: f64) -> Result<Visualization> {
    let headers = data.headers.as_deref().unwrap_or_default();
    let rows = data.rows.as_deref().unwrap_or_default();

    let cols = if !headers.is_empty() {
        headers.len()
    } else {
        rows.first().map_or(0, Vec::len)
    };
    if cols == 0 {
        return Err(EngineError::validation("Table data requires headers or rows"));
    }

    let cell_width = TABLE_MAX_CELL_WIDTH.min((canvas_width - 100.0) / cols as f64);
    if cell_width.is_nan() || cell_width <= 0.0 {
        return Err(EngineError::validation("Canvas is too narrow for a table"));
    }

    let to_row = |values: &[Value]| -> Vec<String> {
        (0..cols)
            .map(|c| values.get(c).map(cell_text).unwrap_or_default())
            .collect()
    };
    let mut cells = Vec::with_capacity(rows.len() + 1);
    if !headers.is_empty() {
        cells.push(to_row(headers));
    }
    cells.extend(rows.iter().map(|r| to_row(r)));

    let style = Style {
        stroke: Some(LABEL_COLOR.to_string()),
        ..Default::default()
    };
    let shape = Shape::Table(Table {
        x: TABLE_ORIGIN.x,
        y: TABLE_ORIGIN.y,
        rows: cells.len(),
        cols,
        cell_width,
        cell_height: TABLE_CELL_HEIGHT,
        cells,
        style,
    });
    Ok(Visualization::new(VizType::Table, vec![shape]))
}

/// Labels and values for a chart, checked for matching non-empty lengths and non-negative values.
fn chart_series(data: &VisualizationData) -> Result<(Vec<String>, &[f64])> {
    let (Some(labels), Some(values)) = (data.labels.as_deref(), data.values.as_deref()) else {
        return Err(EngineError::validation("Chart data requires labels and values"));
    };
    if labels.len() != values.len() {
        return Err(EngineError::validation(format!(
            "Labels and values must have the same length ({} vs {})",
            labels.len(),
            values.len()
        )));
    }
    if values.is_empty() {
        return Err(EngineError::validation("Chart data must not be empty"));
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(EngineError::validation(
            "Chart values must be finite and non-negative",
        ));
    }
    Ok((labels.iter().map(cell_text).collect(), values))
}

fn bar_chart(data: &VisualizationData, canvas_width: f64, canvas_height: f64) -> Result<Visualization> {
    let (labels, values) = chart_series(data)?;

    let chart_width = canvas_width - 2.0 * CHART_MARGIN_LEFT;
    let chart_height = canvas_height - 2.0 * CHART_MARGIN_TOP;
    if chart_width < 0.0 || chart_height < 0.0 {
        return Err(EngineError::validation("Canvas is too small for a bar chart"));
    }
    let max_value = values.iter().copied().fold(f64::MIN, f64::max);
    if max_value <= 0.0 {
        return Err(EngineError::computation(
            "Bar chart needs at least one positive value",
        ));
    }

    let n = values.len();
    let bar_width = chart_width / (2 * n) as f64;
    let baseline = CHART_MARGIN_TOP + chart_height;
    let colors = palette::chart_colors();

    let mut shapes = Vec::with_capacity(3 * n + 1);
    let mut bars = Vec::with_capacity(n);
    for (i, (label, &value)) in labels.iter().zip(values).enumerate() {
        let height = value / max_value * chart_height;
        let x = CHART_MARGIN_LEFT + i as f64 * 2.0 * bar_width + bar_width / 2.0;
        let top = baseline - height;
        let mid = x + bar_width / 2.0;

        shapes.push(Shape::rect(x, top, bar_width, height, colors.cycle(i)));
        shapes.push(Shape::text(mid, baseline + 20.0, label.clone(), LABEL_FONT_SIZE, LABEL_COLOR));
        shapes.push(Shape::text(mid, top - 10.0, format!("{}", value), LABEL_FONT_SIZE, LABEL_COLOR));
        bars.push(Bar {
            label: label.clone(),
            value,
            height,
        });
    }
    shapes.push(Shape::line(
        Point::new(CHART_MARGIN_LEFT, baseline),
        Point::new(CHART_MARGIN_LEFT + chart_width, baseline),
        AXIS_COLOR,
    ));

    let mut viz = Visualization::new(VizType::BarChart, shapes);
    viz.bars = bars;
    viz.chart_height = Some(chart_height);
    Ok(viz)
}

/// Each segment is a fan of one-degree triangles; the last one is clamped to the segment end.
fn pie_chart(data: &VisualizationData, canvas_width: f64, canvas_height: f64) -> Result<Visualization> {
    let (labels, values) = chart_series(data)?;
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(EngineError::validation("Pie chart values must sum to more than 0"));
    }

    let center = Point::new(canvas_width / 2.0, canvas_height / 2.0);
    let radius = canvas_width.min(canvas_height) / 3.0;
    let colors = palette::chart_colors();

    let mut shapes = Vec::new();
    let mut segments = Vec::with_capacity(values.len());
    let mut start = PIE_START_ANGLE;
    for (i, (label, &value)) in labels.iter().zip(values).enumerate() {
        let angle = value / total * 360.0;
        let end = start + angle;
        let steps = angle.round() as usize;
        let color = colors.cycle(i);

        for k in 0..steps {
            let a = start + k as f64;
            let b = (a + 1.0).min(end);
            shapes.push(Shape::triangle(
                [center, center.polar(radius, a), center.polar(radius, b)],
                color,
            ));
        }

        let percent = (value / total * 100.0) as i64;
        let anchor = center.polar(radius + PIE_LABEL_OFFSET, start + angle / 2.0);
        shapes.push(Shape::text(
            anchor.x,
            anchor.y,
            format!("{} ({}%)", label, percent),
            PIE_LABEL_FONT_SIZE,
            LABEL_COLOR,
        ));

        segments.push(PieSegment {
            label: label.clone(),
            value,
            angle,
            percent,
            triangles: steps,
        });
        start = end;
    }

    let mut viz = Visualization::new(VizType::PieChart, shapes);
    viz.segments = segments;
    Ok(viz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart(labels: &[&str], values: &[f64]) -> VisualizationData {
        VisualizationData {
            labels: Some(labels.iter().map(|s| json!(s)).collect()),
            values: Some(values.to_vec()),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_with_headers() {
        let data = VisualizationData {
            headers: Some(vec![json!("Name"), json!("Score")]),
            rows: Some(vec![vec![json!("Ada"), json!(91)], vec![json!("Bob")]]),
            ..Default::default()
        };
        let viz = synthesize(&data, VizType::Table, 1200.0, 600.0).unwrap();
        assert_eq!(viz.shapes.len(), 1);
        match &viz.shapes[0] {
            Shape::Table(t) => {
                assert_eq!((t.rows, t.cols), (3, 2));
                assert_eq!(t.cell_width, 150.0);
                assert_eq!(t.cell_height, 40.0);
                assert_eq!(t.cells[0], vec!["Name", "Score"]);
                assert_eq!(t.cells[1], vec!["Ada", "91"]);
                assert_eq!(t.cells[2], vec!["Bob", ""]);
                assert!(viz.shapes[0].validate().is_ok());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_table_narrow_cells_and_missing_data() {
        let data = VisualizationData {
            rows: Some(vec![vec![json!(1), json!(2), json!(3), json!(4)]]),
            ..Default::default()
        };
        let viz = synthesize(&data, VizType::Table, 500.0, 600.0).unwrap();
        match &viz.shapes[0] {
            Shape::Table(t) => assert_eq!(t.cell_width, 100.0),
            other => panic!("unexpected {:?}", other),
        }
        assert!(synthesize(&VisualizationData::default(), VizType::Table, 500.0, 600.0).is_err());
    }

    #[test]
    fn test_bar_heights_are_proportional() {
        let data = chart(&["A", "B"], &[10.0, 30.0]);

        // 400 × 300 leaves no vertical room: every bar is flat.
        let viz = synthesize(&data, VizType::BarChart, 400.0, 300.0).unwrap();
        assert_eq!(viz.chart_height, Some(0.0));
        assert_eq!(viz.bars.len(), 2);
        assert!(viz.bars.iter().all(|b| b.height == 0.0));
        // rect + 2 labels per bar, plus baseline
        assert_eq!(viz.shapes.len(), 7);

        let viz = synthesize(&data, VizType::BarChart, 800.0, 700.0).unwrap();
        let chart_height = viz.chart_height.unwrap();
        assert!((chart_height - 400.0).abs() < 1e-9);
        assert!((viz.bars[1].height - chart_height).abs() < 1e-9);
        assert!((viz.bars[0].height - chart_height / 3.0).abs() < 1e-9);
        assert!(viz.bars[0].height > 0.0);
    }

    #[test]
    fn test_numeric_labels_are_text() {
        let data: VisualizationData =
            serde_json::from_value(json!({"labels": [2021, 2022], "values": [5, 10]})).unwrap();
        let viz = synthesize(&data, VizType::BarChart, 800.0, 700.0).unwrap();
        assert_eq!(viz.bars[0].label, "2021");
        assert_eq!(viz.bars[1].label, "2022");
        match &viz.shapes[1] {
            Shape::Text(t) => assert_eq!(t.text, "2021"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bar_geometry() {
        let viz = synthesize(&chart(&["A", "B"], &[10.0, 30.0]), VizType::BarChart, 1200.0, 600.0)
            .unwrap();
        // chart 1000 × 300, bar width 250, baseline 450
        match &viz.shapes[3] {
            Shape::Rect(r) => {
                assert!((r.width - 250.0).abs() < 1e-9);
                assert!((r.height - 300.0).abs() < 1e-9);
                assert!((r.x - 725.0).abs() < 1e-9);
                assert!((r.y - 150.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
        match viz.shapes.last() {
            Some(Shape::Line(l)) => {
                assert_eq!((l.x1, l.y1, l.x2, l.y2), (100.0, 450.0, 1100.0, 450.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bar_chart_rejects_bad_input() {
        let mismatched = chart(&["A"], &[1.0, 2.0]);
        assert!(matches!(
            synthesize(&mismatched, VizType::BarChart, 1200.0, 600.0),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            synthesize(&chart(&["A"], &[0.0]), VizType::BarChart, 1200.0, 600.0),
            Err(EngineError::Computation(_))
        ));
    }

    #[test]
    fn test_pie_segments_cover_circle() {
        let viz = synthesize(
            &chart(&["A", "B", "C"], &[1.0, 2.0, 4.0]),
            VizType::PieChart,
            1200.0,
            600.0,
        )
        .unwrap();
        let total_angle: f64 = viz.segments.iter().map(|s| s.angle).sum();
        assert!((total_angle - 360.0).abs() < 1e-9);

        for seg in &viz.segments {
            assert_eq!(seg.triangles, seg.angle.round() as usize);
        }
        let triangles = viz
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Triangle(_)))
            .count();
        assert_eq!(triangles, viz.segments.iter().map(|s| s.triangles).sum::<usize>());
        assert_eq!(viz.segments[0].percent, 14);
        assert_eq!(viz.segments[2].percent, 57);
    }

    #[test]
    fn test_pie_label_text_and_position() {
        let viz = synthesize(&chart(&["Only"], &[5.0]), VizType::PieChart, 900.0, 600.0).unwrap();
        assert_eq!(viz.shapes.len(), 361);
        match viz.shapes.last() {
            Some(Shape::Text(t)) => {
                assert_eq!(t.text, "Only (100%)");
                // bisector of the full circle points straight down: radius 200 + 50
                assert!((t.x - 450.0).abs() < 1e-9);
                assert!((t.y - 550.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_pie_triangles_start_at_center() {
        let viz = synthesize(&chart(&["A", "B"], &[1.0, 1.0]), VizType::PieChart, 600.0, 600.0)
            .unwrap();
        match &viz.shapes[0] {
            Shape::Triangle(t) => {
                let points = t.points.as_ref().unwrap();
                assert_eq!(points[0], Point::new(300.0, 300.0));
                // first edge points to 12 o'clock
                assert!((points[1].x - 300.0).abs() < 1e-9);
                assert!((points[1].y - 100.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_pie_zero_total_fails() {
        assert!(matches!(
            synthesize(&chart(&["X"], &[0.0]), VizType::PieChart, 1200.0, 600.0),
            Err(EngineError::Validation(_))
        ));
        assert!(synthesize(&chart(&[], &[]), VizType::PieChart, 1200.0, 600.0).is_err());
    }
}
