//! Wire form of an operation request, tagged by `operation`.

use serde::Deserialize;
use serde_json::{Map, Value};

use canvasforge_core::{Group, Shape};
use canvasforge_synth::VisualizationData;

/// One operation request as received from a client, tagged by `"operation"`.
///
/// Optional parameters fall back to [`crate::EngineConfig`] defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Request {
    GenerateShapes {
        request: String,
        #[serde(default, alias = "canvasWidth")]
        canvas_width: Option<f64>,
        #[serde(default, alias = "canvasHeight")]
        canvas_height: Option<f64>,
    },
    ListShapes {
        #[serde(default)]
        shapes: Vec<Shape>,
    },
    ModifyShape {
        shapes: Vec<Shape>,
        shape_index: i64,
        #[serde(default)]
        modifications: Map<String, Value>,
    },
    DeleteShape {
        shapes: Vec<Shape>,
        shape_index: i64,
    },
    ArrangeShapes {
        shapes: Vec<Shape>,
        arrangement_type: String,
        #[serde(default)]
        spacing: Option<f64>,
        #[serde(default, alias = "canvasWidth")]
        canvas_width: Option<f64>,
        #[serde(default, alias = "canvasHeight")]
        canvas_height: Option<f64>,
    },
    GeneratePalette {
        #[serde(default)]
        color_scheme: Option<String>,
    },
    ApplyStyle {
        shapes: Vec<Shape>,
        style: String,
    },
    BatchModify {
        shapes: Vec<Shape>,
        #[serde(default)]
        filter_type: Option<String>,
        #[serde(default)]
        modifications: Map<String, Value>,
    },
    GeneratePattern {
        pattern_type: String,
        #[serde(default)]
        count: Option<usize>,
        #[serde(default, alias = "canvasWidth")]
        canvas_width: Option<f64>,
        #[serde(default, alias = "canvasHeight")]
        canvas_height: Option<f64>,
    },
    Visualize {
        data: VisualizationData,
        viz_type: String,
        #[serde(default, alias = "canvasWidth")]
        canvas_width: Option<f64>,
        #[serde(default, alias = "canvasHeight")]
        canvas_height: Option<f64>,
    },
    AnalyzeCanvas {
        #[serde(default)]
        shapes: Vec<Shape>,
    },
    GenerateIcon {
        icon_name: String,
        #[serde(default)]
        size: Option<f64>,
        #[serde(default)]
        color: Option<String>,
    },
    /// Edit a UI group in place, or generate new content for it.
    GroupEdit {
        group: Group,
        #[serde(default)]
        shapes: Option<Vec<Shape>>,
        #[serde(default)]
        modifications: Option<Map<String, Value>>,
        #[serde(default)]
        request: Option<String>,
        #[serde(default, alias = "canvasWidth")]
        canvas_width: Option<f64>,
        #[serde(default, alias = "canvasHeight")]
        canvas_height: Option<f64>,
    },
}

impl Request {
    /// The wire name of this operation.
    pub fn operation(&self) -> &'static str {
        match self {
            Request::GenerateShapes { .. } => "generate_shapes",
            Request::ListShapes { .. } => "list_shapes",
            Request::ModifyShape { .. } => "modify_shape",
            Request::DeleteShape { .. } => "delete_shape",
            Request::ArrangeShapes { .. } => "arrange_shapes",
            Request::GeneratePalette { .. } => "generate_palette",
            Request::ApplyStyle { .. } => "apply_style",
            Request::BatchModify { .. } => "batch_modify",
            Request::GeneratePattern { .. } => "generate_pattern",
            Request::Visualize { .. } => "visualize",
            Request::AnalyzeCanvas { .. } => "analyze_canvas",
            Request::GenerateIcon { .. } => "generate_icon",
            Request::GroupEdit { .. } => "group_edit",
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
