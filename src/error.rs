use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised while building or reconfiguring a chart.
///
/// Per-frame numeric degeneracy is not an error: the engine holds the
/// affected region and logs instead.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing surface must be non-empty, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Malformed series, config values, colors, draw primitives or pointer
    /// coordinates.
    #[error("invalid chart input: {0}")]
    InvalidData(String),
}
