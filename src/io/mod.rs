//! Input/output operations, configuration and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Defaults and configuration file loading
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, conversion and export
pub mod image;
/// Progress display
pub mod progress;
