use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A caller-supplied parameter is outside its valid range.
    InvalidParameter { name: &'static str, reason: String },
}

impl ModelError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            ModelError::InvalidParameter { name, .. } => name,
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Reject NaN, infinities and values `<= 0`.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ModelError::invalid(name, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(ModelError::invalid(name, format!("must be > 0, got {value}")));
    }
    Ok(value)
}
