//! Error types for image handling, compression and search configuration

use std::fmt;
use std::path::PathBuf;

/// Main error type for all segmentation operations
#[derive(Debug)]
pub enum KmarkovError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an output image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Source data doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The complexity estimator could not encode its input
    Compression {
        /// Compression stage that failed
        stage: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Configuration file could not be parsed
    Configuration {
        /// Path of the configuration file
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}

impl fmt::Display for KmarkovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Compression { stage, reason } => {
                write!(f, "Compression error in {stage}: {reason}")
            }
            Self::Configuration { path, reason } => {
                write!(
                    f,
                    "Invalid configuration file '{}': {reason}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for KmarkovError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for segmentation results
pub type Result<T> = std::result::Result<T, KmarkovError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> KmarkovError {
    KmarkovError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a compression error
pub fn compression_error(stage: &'static str, reason: &impl ToString) -> KmarkovError {
    KmarkovError::Compression {
        stage,
        reason: reason.to_string(),
    }
}
