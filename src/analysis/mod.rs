//! Analysis of exploration runs and generated mazes

/// Per-run tallies of moves, backtracks and turns
pub mod statistics;
/// Connectivity and wall consistency checks
pub mod topology;
