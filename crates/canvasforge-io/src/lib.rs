//! # CanvasForge I/O
//!
//! The JSON boundary of the engine: operation requests, the dispatcher that
//! routes them, response envelopes, engine configuration, and the contract
//! with the external natural-language shape generator.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod generator;
pub mod request;

pub use catalog::{tools, ToolInfo};
pub use config::{ConfigError, EngineConfig};
pub use dispatch::Dispatcher;
pub use envelope::Envelope;
pub use generator::{check_request, generate_shapes, parse_generator_response, ShapeGenerator};
pub use request::Request;
