//! Tests for maze rendering and PNG export

#[cfg(test)]
mod tests {
    use micromouse::Simulation;
    use micromouse::algorithm::solver::RobotState;
    use micromouse::MazeError;
    use micromouse::io::configuration::{
        CELL_SIZE, GOAL_COLOR, MAX_IMAGE_SIDE, MIN_CELL_SIZE, ROBOT_COLOR, START_COLOR,
        UNVISITED_COLOR, VISITED_COLOR, WALL_COLOR, WALL_THICKNESS,
    };
    use micromouse::io::image::{
        Markers, Scale, export_simulation_as_png, render_maze, render_simulation,
    };
    use micromouse::spatial::{Direction, Grid, Position};

    fn markers(start: Position, goal: Position, robot: Position) -> Markers {
        Markers {
            start,
            goal,
            robot: RobotState {
                position: robot,
                heading: Direction::South,
            },
        }
    }

    fn centre(position: Position) -> (u32, u32) {
        (
            position.x as u32 * CELL_SIZE + CELL_SIZE / 2,
            position.y as u32 * CELL_SIZE + CELL_SIZE / 2,
        )
    }

    // Tests the image covers the grid at the configured cell size
    // Verified by swapping width and height
    #[test]
    fn test_render_dimensions() {
        let grid = Grid::new(3, 5);
        let img = render_maze(
            &grid,
            |_| false,
            &markers(Position::new(0, 0), Position::new(4, 2), Position::new(1, 1)),
            Scale::default(),
        );
        assert_eq!(img.dimensions(), (5 * CELL_SIZE, 3 * CELL_SIZE));
    }

    // Tests walls, shading and markers land on the expected pixels
    // Verified by drawing the robot before the goal
    #[test]
    fn test_render_colors() {
        let grid = Grid::new(3, 3);
        let start = Position::new(0, 0);
        let goal = Position::new(2, 2);
        let robot = Position::new(1, 1);
        let img = render_maze(
            &grid,
            |position| position == Position::new(2, 0),
            &markers(start, goal, robot),
            Scale::default(),
        );

        assert_eq!(img.get_pixel(0, 0).0, WALL_COLOR);

        let (sx, sy) = centre(start);
        assert_eq!(img.get_pixel(sx, sy).0, START_COLOR);
        let (gx, gy) = centre(goal);
        assert_eq!(img.get_pixel(gx, gy).0, GOAL_COLOR);
        let (rx, ry) = centre(robot);
        assert_eq!(img.get_pixel(rx, ry).0, ROBOT_COLOR);

        let visited_corner = (2 * CELL_SIZE + 5, 5);
        assert_eq!(img.get_pixel(visited_corner.0, visited_corner.1).0, VISITED_COLOR);
        let unvisited_corner = (CELL_SIZE + 5, 5);
        assert_eq!(
            img.get_pixel(unvisited_corner.0, unvisited_corner.1).0,
            UNVISITED_COLOR
        );
    }

    // Tests an open edge leaves the shared border undrawn
    // Verified by drawing walls regardless of flags
    #[test]
    fn test_open_edge_not_drawn() {
        let mut grid = Grid::new(1, 2);
        grid.carve(Position::new(0, 0), Direction::East);
        let img = render_maze(
            &grid,
            |_| false,
            &markers(Position::new(0, 0), Position::new(0, 0), Position::new(0, 0)),
            Scale::default(),
        );

        let border_x = CELL_SIZE - 1;
        assert_eq!(img.get_pixel(border_x, 5).0, UNVISITED_COLOR);
        assert_eq!(img.get_pixel(border_x, 0).0, WALL_COLOR);
    }

    // Tests the robot marker follows the simulation
    // Verified by drawing the robot on the start cell
    #[test]
    fn test_render_simulation() {
        let mut sim = Simulation::new(6, 6, 12).expect("valid dimensions");
        sim.run(3);
        let img = render_simulation(&sim).expect("small grid renders");

        let (x, y) = centre(sim.robot_state().position);
        assert_eq!(img.get_pixel(x, y).0, ROBOT_COLOR);
    }

    // Tests PNG export creates missing directories
    // Verified by removing the create_dir_all call
    #[test]
    fn test_export_png() {
        let sim = Simulation::new(5, 5, 1).expect("valid dimensions");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("maze.png");

        export_simulation_as_png(&sim, &path).expect("export succeeds");
        let loaded = image::open(&path).expect("readable png");
        assert_eq!(loaded.to_rgba8().width(), 5 * CELL_SIZE);
    }

    // Tests small grids keep the default cell size and large ones shrink
    // Verified by always returning the default scale
    #[test]
    fn test_scale_for_grid() {
        let small = Scale::for_grid(&Grid::new(10, 10)).expect("small grid fits");
        assert_eq!(small, Scale::default());
        assert_eq!((small.cell, small.wall), (CELL_SIZE, WALL_THICKNESS));

        let large = Scale::for_grid(&Grid::new(200, 200)).expect("200x200 fits");
        assert_eq!(large.cell, MAX_IMAGE_SIDE / 200);
        assert!(large.wall >= 1 && large.wall < large.cell);

        let result = Scale::for_grid(&Grid::new(3, 600));
        assert!(matches!(result, Err(MazeError::InvalidParameter { .. })));
    }

    // Tests the widest drawable grid stays within the image bound
    // Verified by scaling only by the row count
    #[test]
    fn test_render_at_minimum_scale() {
        let grid = Grid::new(2, 512);
        let scale = Scale::for_grid(&grid).expect("512 columns fit");
        assert_eq!(scale.cell, MIN_CELL_SIZE);

        let img = render_maze(
            &grid,
            |_| true,
            &markers(Position::new(1, 1), Position::new(510, 0), Position::new(1, 1)),
            scale,
        );
        assert_eq!(img.dimensions(), (MAX_IMAGE_SIDE, 2 * MIN_CELL_SIZE));
    }

    // Tests PNG export of an oversized grid fails before touching the disk
    // Verified by rendering before checking the scale
    #[test]
    fn test_export_png_rejects_oversized() {
        let sim = Simulation::new(3, 600, 1).expect("3x600 is a valid simulation");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("maze.png");

        let result = export_simulation_as_png(&sim, &path);
        assert!(matches!(result, Err(MazeError::InvalidParameter { .. })));
        assert!(!dir.path().join("nested").exists());
    }
}
