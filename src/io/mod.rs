/// Command-line parsing and end-to-end builds
pub mod cli;
/// Constants and size configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, candidate discovery and export
pub mod image;
/// Subscriber setup for structured logs
pub mod logging;
/// Terminal progress bars
pub mod progress;
