//! Simulation constants and runtime configuration defaults

// Grid limits
/// Smallest row or column count that leaves room for distinct start and goal insets
pub const MIN_GRID_DIMENSION: usize = 3;
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

// Default values for configurable parameters
/// Default number of rows
pub const DEFAULT_ROWS: usize = 10;
/// Default number of columns
pub const DEFAULT_COLS: usize = 10;
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default step budget per run before giving up
pub const DEFAULT_MAX_STEPS: usize = 5_000;
/// Default number of consecutive seeds processed by the CLI
pub const DEFAULT_RUNS: usize = 1;

// Start and goal placement
/// Column and row of the start cell, one cell in from the north-west corner
pub const START_INSET: i32 = 1;
/// The goal sits this many cells in from the south-east corner, counting the corner itself
pub const GOAL_INSET: i32 = 2;

/// Interval between automatic steps when auto-run is on (in milliseconds)
pub const AUTO_STEP_INTERVAL_MS: u32 = 300;

// Rendering settings
/// Edge length of one cell in exported images (in pixels)
pub const CELL_SIZE: u32 = 40;
/// Thickness of a drawn wall (in pixels)
pub const WALL_THICKNESS: u32 = 2;
/// Longest side of an exported image; larger grids are drawn with smaller cells (in pixels)
pub const MAX_IMAGE_SIDE: u32 = 2_048;
/// Smallest cell edge that still shows walls and markers (in pixels)
pub const MIN_CELL_SIZE: u32 = 4;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the last GIF frame so the final state stays visible
pub const FINAL_FRAME_HOLD: u32 = 10;

// Palette, RGBA
/// Background of a cell the robot has not entered
pub const UNVISITED_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Background of a cell the robot has entered
pub const VISITED_COLOR: [u8; 4] = [220, 220, 255, 255];
/// Walls and cell outlines
pub const WALL_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Start marker
pub const START_COLOR: [u8; 4] = [0, 255, 0, 255];
/// Goal marker
pub const GOAL_COLOR: [u8; 4] = [0, 0, 255, 255];
/// Robot marker
pub const ROBOT_COLOR: [u8; 4] = [255, 0, 0, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Prefix of every file written by the CLI
pub const OUTPUT_PREFIX: &str = "maze";
