//! Error types for fib2tem
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for orientation operations
pub type Result<T> = std::result::Result<T, OrientationError>;

/// Errors that can occur while validating input or computing an orientation
#[derive(Error, Debug)]
pub enum OrientationError {
    /// Notch direction is not one of the eight compass positions
    #[error(
        "Invalid notch direction: '{value}' \
         (expected one of Up, Up-Right, Right, Down-Right, Down, Down-Left, Left, Up-Left)"
    )]
    InvalidNotchDirection { value: String },

    /// Lamellae location is neither bottom-right nor top-left
    #[error("Invalid lamellae location: '{value}' (expected bottom-right or top-left)")]
    InvalidLamellaeLocation { value: String },

    /// Shuttle type is neither 45 nor 35
    #[error("Invalid shuttle type: '{value}' (expected 45 or 35)")]
    InvalidShuttleType { value: String },

    /// Milling angle outside [0, 90]
    #[error("Milling angle out of range: {angle}° (expected 0 to 90)")]
    MillingAngleOutOfRange { angle: i64 },

    /// Two different values were selected for the same field
    #[error("Please select only one {field}.")]
    ConflictingSelection { field: &'static str },

    /// A required field was never selected
    #[error("Please select a {field}.")]
    MissingSelection { field: &'static str },

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// Invalid configuration
    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<OrientationError>,
    },
}

impl OrientationError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        OrientationError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        OrientationError::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for the four input kinds rejected by the calculator itself
    pub fn is_input_error(&self) -> bool {
        match self {
            OrientationError::InvalidNotchDirection { .. }
            | OrientationError::InvalidLamellaeLocation { .. }
            | OrientationError::InvalidShuttleType { .. }
            | OrientationError::MillingAngleOutOfRange { .. } => true,
            OrientationError::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OrientationError::InvalidNotchDirection {
            value: "North".to_string(),
        };
        assert!(err.to_string().contains("'North'"));
        assert!(err.to_string().contains("Up-Left"));
    }

    #[test]
    fn test_angle_out_of_range_display() {
        let err = OrientationError::MillingAngleOutOfRange { angle: 91 };
        assert_eq!(err.to_string(), "Milling angle out of range: 91° (expected 0 to 90)");
    }

    #[test]
    fn test_selection_messages() {
        let err = OrientationError::ConflictingSelection { field: "lamella location" };
        assert_eq!(err.to_string(), "Please select only one lamella location.");

        let err = OrientationError::MissingSelection { field: "shuttle type" };
        assert_eq!(err.to_string(), "Please select a shuttle type.");
    }

    #[test]
    fn test_error_with_context() {
        let err = OrientationError::InvalidShuttleType { value: "50".into() };
        let wrapped = err.with_context("line 3");
        assert!(wrapped.to_string().starts_with("line 3: "));
        assert!(wrapped.is_input_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OrientationError = io_err.into();
        assert!(matches!(err, OrientationError::Io(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(OrientationError::invalid_config("cfg.json", "bad"));
        let err = result.context("loading config").unwrap_err();
        assert!(err.to_string().contains("loading config"));
        assert!(err.to_string().contains("cfg.json"));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: OrientationError = utf8_err.into();
        assert!(err.to_string().starts_with("UTF-8 encoding error"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: OrientationError = json_err.into();
        assert!(matches!(err, OrientationError::Json(_)));
    }
}
