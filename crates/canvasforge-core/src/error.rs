use thiserror::Error;

/// Failure taxonomy shared by every canvas operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Missing or malformed required parameters.
    #[error("{0}")]
    Validation(String),

    /// Index outside `0..len`; signed because wire indices may be negative.
    #[error("Invalid shape index {index}: canvas has {len} shapes")]
    Index { index: i64, len: usize },

    /// Degenerate numeric input (zero totals, zero counts).
    #[error("{0}")]
    Computation(String),

    /// The external shape generator failed or answered with garbage.
    #[error("{0}")]
    Upstream(String),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        EngineError::Computation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        EngineError::Upstream(msg.into())
    }

    pub fn index(index: usize, len: usize) -> Self {
        EngineError::Index {
            index: index as i64,
            len,
        }
    }

    /// Stable machine-readable category name.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::Index { .. } => "index",
            EngineError::Computation(_) => "computation",
            EngineError::Upstream(_) => "upstream",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
