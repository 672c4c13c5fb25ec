//! Crate error type.
//!
//! `set_points` errors leave the engine untouched; `iterate` errors are
//! likewise non-destructive (see `engine::Polyspring::iterate`).

/// Errors the engine can report.
#[derive(Debug, thiserror::Error)]
pub enum PolyspringError {
    #[error("need at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("column index {col} exceeds row stride {stride}")]
    ColumnOutOfBounds { col: usize, stride: usize },

    #[error("block declares {declared} rows but only {available} values are available at stride {stride}")]
    BlockTooShort {
        declared: usize,
        available: usize,
        stride: usize,
    },

    #[error("set_points requested {total} points but blocks supplied only {supplied}")]
    TotalRowsMismatch { total: usize, supplied: usize },

    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    #[error("delaunay triangulation failed (fewer than 3 resulting vertices)")]
    TriangulationFailed,

    #[error("set_points must be called before iterate")]
    NotInitialized,
}

pub type PolyspringResult<T> = Result<T, PolyspringError>;
