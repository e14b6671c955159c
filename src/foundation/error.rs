/// Convenience result type used across the crate.
pub type AcrylicResult<T> = Result<T, AcrylicError>;

/// Error taxonomy for material generation.
#[derive(thiserror::Error, Debug)]
pub enum AcrylicError {
    /// The configuration lacks a background or a blur algorithm.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// A parameter is outside its domain (scale factor, blur radius, empty layer list).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A layer does not match the base dimensions under strict alignment.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The blur algorithm could not produce output for the given buffer.
    #[error("blur failed: {0}")]
    BlurFailed(String),

    /// Wrapped lower-level error from decoding or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AcrylicError {
    /// Build a [`AcrylicError::MissingConfiguration`] value.
    pub fn missing_configuration(msg: impl Into<String>) -> Self {
        Self::MissingConfiguration(msg.into())
    }

    /// Build a [`AcrylicError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`AcrylicError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`AcrylicError::BlurFailed`] value.
    pub fn blur_failed(msg: impl Into<String>) -> Self {
        Self::BlurFailed(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
