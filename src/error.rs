//! Error type shared by the grid, shading and visibility layers.

/// Every way a lighting call can fail. Any error aborts the whole call;
/// no partially shaded grid is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LightingError {
    /// The input grid is empty or has rows of different lengths.
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// The observer lies outside the grid.
    #[error("origin ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        col: i64,
        row: i64,
        width: usize,
        height: usize,
    },

    /// A visible cell holds a symbol the shader has no rule for.
    #[error("no shading rule for symbol {symbol:?} (seen at distance {distance})")]
    UnrecognizedSymbol { symbol: char, distance: u32 },

    /// A configuration value violates its precondition.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl LightingError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        LightingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
