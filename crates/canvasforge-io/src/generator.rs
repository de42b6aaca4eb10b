//! Contract with the external natural-language shape generator.
//!
//! The generator itself (a language-model call) lives outside this workspace.
//! It is handed a request and the canvas size and answers with raw JSON text,
//! either `{"shapes": [...]}` or `{"error": "..."}`. This module validates
//! that answer and normalizes the shapes before they go anywhere else.

use serde_json::Value;

use canvasforge_core::{normalize_shapes, EngineError, Result, Shape};

/// Produces raw generator output for a natural-language request.
pub trait ShapeGenerator {
    fn generate(&self, request: &str, canvas_width: f64, canvas_height: f64) -> Result<String>;
}

impl<F> ShapeGenerator for F
where
    F: Fn(&str, f64, f64) -> Result<String>,
{
    fn generate(&self, request: &str, canvas_width: f64, canvas_height: f64) -> Result<String> {
        self(request, canvas_width, canvas_height)
    }
}

/// Turn raw generator text into validated, normalized shapes.
pub fn parse_generator_response(raw: &str) -> Result<Vec<Shape>> {
    let response: Value = serde_json::from_str(raw.trim())
        .map_err(|e| EngineError::upstream(format!("Failed to parse AI response: {}", e)))?;

    if let Some(error) = response.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(EngineError::upstream(message));
    }

    let Some(shapes) = response.get("shapes") else {
        return Err(EngineError::upstream(
            "Invalid response format: missing 'shapes' key",
        ));
    };
    let mut shapes: Vec<Shape> = serde_json::from_value(shapes.clone())
        .map_err(|e| EngineError::upstream(format!("Invalid shape in AI response: {}", e)))?;
    for shape in &shapes {
        shape
            .validate()
            .map_err(|e| EngineError::upstream(format!("Invalid shape in AI response: {}", e)))?;
    }

    normalize_shapes(&mut shapes);
    Ok(shapes)
}

/// The trimmed request, or a validation error if nothing is left.
pub fn check_request(request: &str) -> Result<&str> {
    let request = request.trim();
    if request.is_empty() {
        return Err(EngineError::validation("Request cannot be empty"));
    }
    Ok(request)
}

/// Ask `generator` for shapes, rejecting empty requests before the call.
pub fn generate_shapes(
    generator: &dyn ShapeGenerator,
    request: &str,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Vec<Shape>> {
    let request = check_request(request)?;

    log::info!("Generating shapes for request: {}", request);
    let raw = generator.generate(request, canvas_width, canvas_height)?;
    let shapes = parse_generator_response(&raw)?;
    log::info!("Successfully generated {} shapes", shapes.len());
    Ok(shapes)
}
