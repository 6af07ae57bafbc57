//! Errors raised while building geometry or loading configuration.
//!
//! Queries never fail; only construction and settings I/O do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex {index} is not finite: ({x}, {y})")]
    NonFiniteVertex { index: usize, x: f32, y: f32 },

    #[error("polygon collapses to {0} non-degenerate edges (need at least 3)")]
    CollapsedPolygon(usize),

    #[error("side count {0} is below 3")]
    InvalidSideCount(usize),

    #[error("obstacle size must be positive and finite, got {0}")]
    InvalidSize(f32),

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("settings i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}
