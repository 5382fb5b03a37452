//! Error types for quillplot operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building scales or rendering shapes.
///
/// Missing data values are never reported here: a missing axis value is
/// skipped by the shape that renders it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Scale domain error (e.g., `min > max`).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// A shape cannot render the given series.
    #[error("Invalid series: {0}")]
    Validation(String),

    /// The scale has no meaningful implementation of the operation.
    #[error("{operation} is not supported by {scale} scales")]
    UnsupportedForScale {
        /// Operation name.
        operation: &'static str,
        /// Scale variant name.
        scale: &'static str,
    },

    /// A value of the wrong kind was passed to a scale.
    #[error("{scale} scale cannot project value {value}")]
    IncompatibleValue {
        /// Scale variant name.
        scale: &'static str,
        /// Rendered offending value.
        value: String,
    },

    /// A categorical value is not a member of the scale's domain.
    #[error("Value {0} is not in the scale domain")]
    NotInDomain(String),

    /// The palette ran out of colors.
    #[error("Palette has no more colors")]
    PaletteExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ScaleDomain("min 10 is greater than max 0".to_string());
        assert!(err.to_string().contains("Scale domain error"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::UnsupportedForScale {
            operation: "project_interval",
            scale: "temporal",
        };
        assert_eq!(
            err.to_string(),
            "project_interval is not supported by temporal scales"
        );
    }

    #[test]
    fn test_incompatible_value_display() {
        let err = Error::IncompatibleValue {
            scale: "linear",
            value: "\"foo\"".to_string(),
        };
        assert!(err.to_string().contains("linear"));
        assert!(err.to_string().contains("foo"));
    }
}
