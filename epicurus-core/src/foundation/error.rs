/// Convenience result type used across Epicurus.
pub type EpicurusResult<T> = Result<T, EpicurusError>;

/// Error taxonomy returned by every engine operation.
///
/// All variants are recoverable: an operation that fails leaves the layer store and every buffer
/// exactly as it was.
#[derive(thiserror::Error, Debug)]
pub enum EpicurusError {
    /// A pixel coordinate fell outside the buffer.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Two buffers (or a layer stack) that must share width and height do not.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A scalar division or a kernel divisor was zero.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// A layer lookup by name found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A layer with the same name already exists.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// A typed parameter is outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EpicurusError {
    /// Build an [`EpicurusError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build an [`EpicurusError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build an [`EpicurusError::DivisionByZero`] value.
    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        Self::DivisionByZero(msg.into())
    }

    /// Build an [`EpicurusError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build an [`EpicurusError::DuplicateName`] value.
    pub fn duplicate_name(msg: impl Into<String>) -> Self {
        Self::DuplicateName(msg.into())
    }

    /// Build an [`EpicurusError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
