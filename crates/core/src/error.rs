/// Result alias that carries the custom [`RippleError`] type.
pub type Result<T> = std::result::Result<T, RippleError>;

/// Common error type for the core crate.
///
/// Only configuration problems are real failures. Degenerate layouts and
/// out-of-order lifecycle calls are tolerated and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum RippleError {
    /// A configuration value is missing, out of range or not finite.
    #[error("invalid ripple configuration: {0}")]
    InvalidConfig(String),
    /// A color string could not be parsed as `#RRGGBB` or `#AARRGGBB`.
    #[error("invalid color `{0}`, expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration documents that fail to deserialize.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl RippleError {
    pub(crate) fn config<T: Into<String>>(reason: T) -> Self {
        Self::InvalidConfig(reason.into())
    }
}
