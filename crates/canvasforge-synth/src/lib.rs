//! # CanvasForge Synth
//!
//! Shape lists built from scratch: procedural patterns, tables and charts
//! synthesized from structured data, and the static icon library.
//!
//! Nothing here reads existing canvas state.

pub mod icons;
pub mod pattern;
pub mod visualize;

pub use icons::{icon, Icon};
pub use pattern::{generate_pattern, Pattern, PatternKind};
pub use visualize::{synthesize, Visualization, VisualizationData, VizType};
