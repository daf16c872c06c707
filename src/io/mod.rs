//! Command line, constants, errors and image output

/// Command-line arguments and the batch runner
pub mod cli;
/// Simulation constants and rendering colors
pub mod configuration;
/// Key bindings and auto-step timing
pub mod controls;
/// Error types and result alias
pub mod error;
/// PNG rendering of mazes
pub mod image;
/// Terminal progress bars for batch runs
pub mod progress;
/// Trace capture and animated GIF export
pub mod visualization;
