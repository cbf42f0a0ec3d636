//! Input/output operations, configuration and error handling

/// Command-line interface and analysis orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and context propagation
pub mod error;
/// PNG chunk loading with a shared tile palette
pub mod image;
/// Progress display while loading chunks
pub mod progress;
/// Text export of adjacency maps and constraint tables
pub mod report;
