//! Raster rendering of a maze with exploration state and PNG export

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::algorithm::executor::Simulation;
use crate::algorithm::solver::RobotState;
use crate::io::configuration::{
    CELL_SIZE, GOAL_COLOR, MAX_IMAGE_SIDE, MIN_CELL_SIZE, ROBOT_COLOR, START_COLOR,
    UNVISITED_COLOR, VISITED_COLOR, WALL_COLOR, WALL_THICKNESS,
};
use crate::io::error::{MazeError, Result, invalid_parameter};
use crate::spatial::{Direction, Grid, Position};

/// Marker positions drawn on top of the maze
#[derive(Debug, Clone, Copy)]
pub struct Markers {
    /// Start cell
    pub start: Position,
    /// Goal cell
    pub goal: Position,
    /// Robot pose
    pub robot: RobotState,
}

/// Pixel sizes used to draw one maze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    /// Edge length of a cell
    pub cell: u32,
    /// Thickness of a wall
    pub wall: u32,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            cell: CELL_SIZE,
            wall: WALL_THICKNESS,
        }
    }
}

impl Scale {
    /// Largest scale, capped at the default, whose image fits in [`MAX_IMAGE_SIDE`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the cells would shrink below
    /// [`MIN_CELL_SIZE`]
    pub fn for_grid(maze: &Grid) -> Result<Self> {
        let longest = maze.rows().max(maze.cols()).max(1);
        let cell = u32::try_from(longest)
            .map_or(0, |side| MAX_IMAGE_SIDE / side)
            .min(CELL_SIZE);
        if cell < MIN_CELL_SIZE {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", maze.rows(), maze.cols()),
                &format!(
                    "cells would be under {MIN_CELL_SIZE} pixels in a {MAX_IMAGE_SIDE} pixel image"
                ),
            ));
        }

        Ok(Self {
            cell,
            wall: (cell * WALL_THICKNESS / CELL_SIZE).max(1),
        })
    }
}

/// Render the true walls of `maze`, shading cells for which `is_visited` holds
///
/// Markers are drawn in the order start, goal, robot so the robot stays
/// visible on either of them.
pub fn render_maze<F>(maze: &Grid, is_visited: F, markers: &Markers, scale: Scale) -> RgbaImage
where
    F: Fn(Position) -> bool,
{
    let Scale { cell, wall } = scale;
    let width = maze.cols() as u32 * cell;
    let height = maze.rows() as u32 * cell;
    let mut img = RgbaImage::from_pixel(width, height, Rgba(UNVISITED_COLOR));

    for position in maze.positions() {
        let (left, top) = cell_origin(position, cell);

        if is_visited(position) {
            fill_rect(&mut img, left, top, cell, cell, VISITED_COLOR);
        }

        let walls = maze.walls(position);
        if walls.north {
            fill_rect(&mut img, left, top, cell, wall, WALL_COLOR);
        }
        if walls.east {
            fill_rect(&mut img, left + cell - wall, top, wall, cell, WALL_COLOR);
        }
        if walls.south {
            fill_rect(&mut img, left, top + cell - wall, cell, wall, WALL_COLOR);
        }
        if walls.west {
            fill_rect(&mut img, left, top, wall, cell, WALL_COLOR);
        }
    }

    draw_marker(&mut img, markers.start, cell, START_COLOR);
    draw_marker(&mut img, markers.goal, cell, GOAL_COLOR);
    draw_marker(&mut img, markers.robot.position, cell, ROBOT_COLOR);
    draw_heading(&mut img, markers.robot, scale);

    img
}

/// Render the current state of a simulation
///
/// # Errors
///
/// Returns `InvalidParameter` if the grid is too large to draw
pub fn render_simulation(simulation: &Simulation) -> Result<RgbaImage> {
    let scale = Scale::for_grid(simulation.maze())?;
    let markers = Markers {
        start: simulation.start(),
        goal: simulation.goal(),
        robot: simulation.robot_state(),
    };
    let discovered = simulation.discovered();
    Ok(render_maze(
        simulation.maze(),
        |position| discovered.is_visited(position),
        &markers,
        scale,
    ))
}

/// Export the current state of a simulation as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid is too large to draw
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_simulation_as_png(simulation: &Simulation, output_path: &Path) -> Result<()> {
    let img = render_simulation(simulation)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| MazeError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}

fn cell_origin(position: Position, cell: u32) -> (u32, u32) {
    (
        position.x.max(0) as u32 * cell,
        position.y.max(0) as u32 * cell,
    )
}

fn fill_rect(img: &mut RgbaImage, left: u32, top: u32, width: u32, height: u32, color: [u8; 4]) {
    for y in top..top.saturating_add(height) {
        for x in left..left.saturating_add(width) {
            if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
                *pixel = Rgba(color);
            }
        }
    }
}

// Filled disc of radius cell / 4 centred in the cell
fn draw_marker(img: &mut RgbaImage, position: Position, cell: u32, color: [u8; 4]) {
    let (left, top) = cell_origin(position, cell);
    let centre = (i64::from(left + cell / 2), i64::from(top + cell / 2));
    let radius = i64::from(cell / 4);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (x, y) = (centre.0 + dx, centre.1 + dy);
            if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y))
                && let Some(pixel) = img.get_pixel_mut_checked(x, y)
            {
                *pixel = Rgba(color);
            }
        }
    }
}

// Short tick from the robot's centre towards its heading
fn draw_heading(img: &mut RgbaImage, robot: RobotState, scale: Scale) {
    let Scale { cell, wall } = scale;
    let (left, top) = cell_origin(robot.position, cell);
    let centre_x = left + cell / 2;
    let centre_y = top + cell / 2;
    let reach = cell / 4 + wall * 2;
    let half = wall / 2;

    let (x, y, width, height) = match robot.heading {
        Direction::North => (
            centre_x.saturating_sub(half),
            centre_y.saturating_sub(reach),
            wall,
            reach,
        ),
        Direction::East => (centre_x, centre_y.saturating_sub(half), reach, wall),
        Direction::South => (centre_x.saturating_sub(half), centre_y, wall, reach),
        Direction::West => (
            centre_x.saturating_sub(reach),
            centre_y.saturating_sub(half),
            reach,
            wall,
        ),
    };
    fill_rect(img, x, y, width, height, ROBOT_COLOR);
}
