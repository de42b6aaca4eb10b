//! # CanvasForge Core
//!
//! Shape record model, geometry primitives, palette registry, and the
//! shape-list operations that work on an existing canvas: editing, group
//! edits, arrangement, styling, and triangle normalization.
//!
//! Operations are split into copy-on-write [`Transform`]s and in-place
//! [`Edit`]s; see [`commands`].

pub mod arrange;
pub mod commands;
pub mod error;
pub mod geometry;
pub mod group;
pub mod normalize;
pub mod palette;
pub mod shape;
pub mod style;

pub use arrange::{ArrangeShapes, Arrangement, Layout};
pub use commands::{
    list_shapes, DeleteShapeCommand, Edit, ModifyGroupCommand, ModifyShapeCommand, ShapeListing,
    Transform,
};
pub use error::{EngineError, Result};
pub use geometry::{BBox, Point};
pub use group::Group;
pub use normalize::normalize_shapes;
pub use palette::Palette;
pub use shape::{Shape, Style};
pub use style::{ApplyStyle, BatchModify, BatchResult, ShapeFilter, VisualStyle};
