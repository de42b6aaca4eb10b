//! Routes a [`Request`] to the matching engine operation and wraps the
//! outcome in an [`Envelope`].
//!
//! This is the one boundary where an [`EngineError`] becomes an error
//! envelope. Nothing panics on bad input and nothing is retried.

use serde_json::json;

use canvasforge_analysis::analyze;
use canvasforge_core::palette;
use canvasforge_core::{
    list_shapes, normalize_shapes, ApplyStyle, ArrangeShapes, BatchModify, DeleteShapeCommand,
    Edit, EngineError, Group, Layout, ModifyGroupCommand, ModifyShapeCommand, Result, Shape,
    ShapeFilter, Transform,
};
use canvasforge_synth::{generate_pattern, icon, synthesize, PatternKind, VizType};

use crate::config::EngineConfig;
use crate::envelope::Envelope;
use crate::generator::{check_request, generate_shapes, ShapeGenerator};
use crate::request::Request;

pub struct Dispatcher {
    config: EngineConfig,
    generator: Option<Box<dyn ShapeGenerator>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn validate_all(shapes: &[Shape]) -> Result<()> {
    shapes.iter().try_for_each(Shape::validate)
}

fn run_edit<E: Edit>(edit: E, shapes: &mut Vec<Shape>) -> Result<E::Output> {
    log::debug!("{}: {:?}", edit.description(), edit);
    edit.execute(shapes)
}

fn run_transform<T: Transform>(transform: T, shapes: &[Shape]) -> Result<T::Output> {
    log::debug!("{}: {:?}", transform.description(), transform);
    transform.apply(shapes)
}

/// Convert a wire index, rejecting negatives as out of range.
fn shape_index(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index).map_err(|_| EngineError::Index { index, len })
}

impl Dispatcher {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    /// Attach the external natural-language generator.
    pub fn with_generator(mut self, generator: impl ShapeGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Parse and handle a raw JSON request.
    pub fn handle_json(&self, raw: &str) -> Envelope {
        match Request::from_json(raw) {
            Ok(request) => self.handle(request),
            Err(e) => {
                log::warn!("Rejected malformed request: {}", e);
                Envelope::failure(&EngineError::validation(format!("Invalid request: {}", e)))
            }
        }
    }

    pub fn handle(&self, request: Request) -> Envelope {
        let operation = request.operation();
        log::debug!("Dispatching {}", operation);
        match self.execute(request) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::error!("{} failed ({}): {}", operation, e.kind(), e);
                Envelope::failure(&e)
            }
        }
    }

    /// Blank requests fail validation before the generator is looked up.
    fn generate(&self, request: &str, canvas_width: f64, canvas_height: f64) -> Result<Vec<Shape>> {
        let request = check_request(request)?;
        let generator = self
            .generator
            .as_deref()
            .ok_or_else(|| EngineError::upstream("No shape generator is configured"))?;
        generate_shapes(generator, request, canvas_width, canvas_height)
    }

    fn canvas(&self, width: Option<f64>, height: Option<f64>) -> Result<(f64, f64)> {
        let w = width.unwrap_or(self.config.canvas_width);
        let h = height.unwrap_or(self.config.canvas_height);
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Err(EngineError::validation(
                "Canvas dimensions must be positive numbers",
            ));
        }
        Ok((w, h))
    }

    fn execute(&self, request: Request) -> Result<Envelope> {
        match request {
            Request::GenerateShapes {
                request,
                canvas_width,
                canvas_height,
            } => {
                let (w, h) = self.canvas(canvas_width, canvas_height)?;
                let shapes = self.generate(&request, w, h)?;
                Envelope::success(
                    Some(format!("Generated {} shapes", shapes.len())),
                    json!({ "shapes": shapes }),
                )
            }

            Request::ListShapes { shapes } => {
                validate_all(&shapes)?;
                let listing = list_shapes(&shapes);
                Envelope::success(Some(format!("Canvas has {} shapes", listing.count)), listing)
            }

            Request::ModifyShape {
                mut shapes,
                shape_index: index,
                modifications,
            } => {
                validate_all(&shapes)?;
                let index = shape_index(index, shapes.len())?;
                let modified = run_edit(ModifyShapeCommand::new(index, modifications), &mut shapes)?;
                Envelope::success(
                    Some(format!("Shape {} modified", index)),
                    json!({ "shapes": shapes, "modified_shape": modified, "shape_index": index }),
                )
            }

            Request::DeleteShape {
                mut shapes,
                shape_index: index,
            } => {
                validate_all(&shapes)?;
                let index = shape_index(index, shapes.len())?;
                let deleted = run_edit(DeleteShapeCommand::new(index), &mut shapes)?;
                Envelope::success(
                    Some(format!("Shape {} deleted", index)),
                    json!({ "shapes": shapes, "deleted_shape": deleted }),
                )
            }

            Request::ArrangeShapes {
                shapes,
                arrangement_type,
                spacing,
                canvas_width,
                canvas_height,
            } => {
                validate_all(&shapes)?;
                let layout: Layout = arrangement_type.parse()?;
                let (w, h) = self.canvas(canvas_width, canvas_height)?;
                let spacing = spacing.unwrap_or(self.config.spacing);
                let arrangement = run_transform(ArrangeShapes::new(layout, spacing, w, h), &shapes)?;
                Envelope::success(
                    Some(format!(
                        "Arranged {} shapes in {} layout",
                        arrangement.shapes.len(),
                        layout
                    )),
                    arrangement,
                )
            }

            Request::GeneratePalette { color_scheme } => {
                let requested = color_scheme.unwrap_or_else(|| self.config.palette.clone());
                let palette = palette::resolve(&requested);
                Envelope::success(
                    Some(format!("Generated {} palette", palette.name)),
                    json!({
                        "palette": palette.name,
                        "colors": palette.colors,
                        "available": palette::all().iter().map(|p| p.name).collect::<Vec<_>>(),
                    }),
                )
            }

            Request::ApplyStyle { shapes, style } => {
                validate_all(&shapes)?;
                let styled = run_transform(ApplyStyle::new(&style), &shapes)?;
                Envelope::success(
                    Some(format!("Applied {} style to {} shapes", style, styled.len())),
                    json!({ "shapes": styled, "style": style }),
                )
            }

            Request::BatchModify {
                shapes,
                filter_type,
                modifications,
            } => {
                validate_all(&shapes)?;
                let filter: ShapeFilter = filter_type
                    .as_deref()
                    .unwrap_or(&self.config.batch_filter)
                    .parse()?;
                let result = run_transform(BatchModify::new(filter, modifications), &shapes)?;
                Envelope::success(
                    Some(format!("Modified {} shapes", result.shapes_modified)),
                    result,
                )
            }

            Request::GeneratePattern {
                pattern_type,
                count,
                canvas_width,
                canvas_height,
            } => {
                let kind: PatternKind = pattern_type.parse()?;
                let (w, h) = self.canvas(canvas_width, canvas_height)?;
                let count = count.unwrap_or(self.config.pattern_count);
                let mut pattern = generate_pattern(kind, count, w, h)?;
                normalize_shapes(&mut pattern.shapes);
                Envelope::success(
                    Some(format!(
                        "Generated {} pattern with {} shapes",
                        kind,
                        pattern.shapes.len()
                    )),
                    pattern,
                )
            }

            Request::Visualize {
                data,
                viz_type,
                canvas_width,
                canvas_height,
            } => {
                let viz_type: VizType = viz_type.parse()?;
                let (w, h) = self.canvas(canvas_width, canvas_height)?;
                let mut viz = synthesize(&data, viz_type, w, h)?;
                normalize_shapes(&mut viz.shapes);
                Envelope::success(
                    Some(format!("Created {} with {} shapes", viz_type, viz.shapes.len())),
                    viz,
                )
            }

            Request::AnalyzeCanvas { shapes } => {
                validate_all(&shapes)?;
                let stats = analyze(&shapes);
                Envelope::success(
                    Some(format!("Analyzed {} shapes", stats.total_shapes)),
                    stats,
                )
            }

            Request::GenerateIcon {
                icon_name,
                size,
                color,
            } => {
                let size = size.unwrap_or(self.config.icon_size);
                let color = color.unwrap_or_else(|| self.config.icon_color.clone());
                let mut generated = icon(&icon_name, size, &color)?;
                normalize_shapes(&mut generated.shapes);
                Envelope::success(
                    Some(format!("Generated {} icon", generated.icon)),
                    generated,
                )
            }

            Request::GroupEdit {
                group,
                shapes,
                modifications,
                request,
                canvas_width,
                canvas_height,
            } => self.group_edit(group, shapes, modifications, request, canvas_width, canvas_height),
        }
    }

    fn group_edit(
        &self,
        group: Group,
        shapes: Option<Vec<Shape>>,
        modifications: Option<serde_json::Map<String, serde_json::Value>>,
        request: Option<String>,
        canvas_width: Option<f64>,
        canvas_height: Option<f64>,
    ) -> Result<Envelope> {
        match (shapes, request) {
            (Some(mut shapes), _) => {
                validate_all(&shapes)?;
                let modifications = modifications.unwrap_or_default();
                let resolved =
                    run_edit(ModifyGroupCommand::new(group.clone(), modifications), &mut shapes)?;
                Envelope::success(
                    Some(format!(
                        "Modified {} shapes in group {}",
                        resolved.valid.len(),
                        group.id
                    )),
                    json!({
                        "shapes": shapes,
                        "group": group,
                        "modified_indices": resolved.valid,
                        "skipped_indices": resolved.stale,
                    }),
                )
            }
            (None, Some(request)) => {
                let (w, h) = self.canvas(canvas_width, canvas_height)?;
                let shapes = self.generate(&request, w, h)?;
                Envelope::success(
                    Some(format!(
                        "Generated {} shapes for group {}",
                        shapes.len(),
                        group.id
                    )),
                    json!({ "shapes": shapes, "group": group }),
                )
            }
            (None, None) => Err(EngineError::validation(
                "Group edit requires either shapes with modifications or a request",
            )),
        }
    }
}
