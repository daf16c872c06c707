/// Dense per-cell membership sets
pub mod bitset;
/// Simulation controller and front-end commands
pub mod executor;
/// Randomized depth-first maze carving
pub mod generation;
/// Copying true walls into the robot's map
pub mod sensing;
/// Robot state and the exploration state machine
pub mod solver;
