//! Simulation controller owning both mazes, the robot and the solver

use std::path::Path;

use crate::{
    algorithm::generation::generate,
    algorithm::solver::{
        ExplorationPolicy, Robot, RobotState, Solver, SolverState, StepOutcome,
    },
    analysis::statistics::RunStatistics,
    io::configuration::{
        DEFAULT_COLS, DEFAULT_ROWS, GOAL_INSET, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION,
        START_INSET,
    },
    io::error::{MazeError, Result, invalid_dimensions},
    io::visualization::TraceCapture,
    spatial::{Direction, Grid, Position, Walls},
};

/// Heading of the robot whenever it is placed on the start cell
pub const START_HEADING: Direction = Direction::South;

/// Which of the two mazes a query reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knowledge {
    /// Ground truth produced by the generator
    True,
    /// What the robot has sensed so far
    Discovered,
}

/// Grid shape and solve policy of a simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Candidate ordering used by the solver
    pub policy: ExplorationPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl SimulationConfig {
    /// Configuration with the default policy
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            policy: ExplorationPolicy::default(),
        }
    }

    /// Same configuration with another policy
    #[must_use]
    pub const fn with_policy(mut self, policy: ExplorationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start cell, one cell in from the north-west corner
    pub const fn start(&self) -> Position {
        Position::new(START_INSET, START_INSET)
    }

    /// Goal cell, one cell in from the south-east corner
    pub const fn goal(&self) -> Position {
        Position::new(self.cols as i32 - GOAL_INSET, self.rows as i32 - GOAL_INSET)
    }

    /// Check that start and goal insets fit inside the grid
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either dimension is below
    /// [`MIN_GRID_DIMENSION`] or above [`MAX_GRID_DIMENSION`].
    pub fn validate(&self) -> Result<()> {
        if self.rows < MIN_GRID_DIMENSION || self.cols < MIN_GRID_DIMENSION {
            return Err(invalid_dimensions(
                self.rows,
                self.cols,
                &format!(
                    "rows and cols must both be at least {MIN_GRID_DIMENSION} to place start and goal"
                ),
            ));
        }
        if self.rows > MAX_GRID_DIMENSION || self.cols > MAX_GRID_DIMENSION {
            return Err(invalid_dimensions(
                self.rows,
                self.cols,
                &format!("dimensions are limited to {MAX_GRID_DIMENSION}"),
            ));
        }
        Ok(())
    }
}

/// Requests a front end can forward to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Perform one solver step
    Step,
    /// Flip the auto-run flag
    ToggleAutoRun,
    /// Restart exploration on the current maze
    Reset,
    /// Generate a new maze from the next seed and restart
    Regenerate,
}

/// Micromouse simulation owning both mazes, the robot and the solver
///
/// This is the composition root a front end drives: it calls
/// [`Simulation::step`], [`Simulation::reset`] or [`Simulation::generate_new`]
/// and reads the accessors for display. All state changes go through
/// `&mut self`, one atomic transition per call.
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    maze: Grid,
    discovered: Grid,
    robot: Robot,
    solver: Solver,
    auto_run: bool,
    steps_taken: usize,
    /// Optional trace capture for GIF export
    pub visualization: Option<TraceCapture>,
}

impl Simulation {
    /// Generate a maze and place the robot on the start cell
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if `rows` or `cols` is below 3
    /// or above the grid limit.
    pub fn new(rows: usize, cols: usize, seed: u64) -> Result<Self> {
        Self::with_config(SimulationConfig::new(rows, cols), seed)
    }

    /// Generate a maze for an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if the configuration does not
    /// validate.
    pub fn with_config(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let maze = generate(config.rows, config.cols, seed)?;

        let mut simulation = Self {
            config,
            seed,
            maze,
            discovered: Grid::new(config.rows, config.cols),
            robot: Robot::new(config.start(), START_HEADING),
            solver: Solver::new(config.goal(), config.policy),
            auto_run: false,
            steps_taken: 0,
            visualization: None,
        };
        simulation.reset();
        Ok(simulation)
    }

    /// Replace the maze with a freshly generated one and reset
    ///
    /// # Errors
    ///
    /// Propagates generator errors; the current maze is kept in that case.
    pub fn generate_new(&mut self, seed: u64) -> Result<()> {
        self.maze = generate(self.config.rows, self.config.cols, seed)?;
        self.seed = seed;
        log::info!(
            "Generated {}x{} maze from seed {seed}",
            self.config.rows,
            self.config.cols
        );
        self.reset();
        Ok(())
    }

    /// Forget everything the robot learned and put it back on the start cell
    pub fn reset(&mut self) {
        let start = self.config.start();

        self.discovered = Grid::new(self.config.rows, self.config.cols);
        self.discovered.mark_visited(start);
        self.robot = Robot::new(start, START_HEADING);
        self.solver = Solver::new(self.config.goal(), self.config.policy);
        self.auto_run = false;
        self.steps_taken = 0;

        if let Some(ref mut viz) = self.visualization {
            viz.restart(start, START_HEADING);
        }
    }

    /// Advance the robot by one decision
    pub fn step(&mut self) -> StepOutcome {
        let outcome = self
            .solver
            .step(&mut self.robot, &self.maze, &mut self.discovered);

        if !outcome.is_terminal() {
            self.steps_taken += 1;
        }

        if let Some(ref mut viz) = self.visualization {
            viz.record(&outcome, self.steps_taken);
        }

        outcome
    }

    /// Step until a terminal outcome or until `max_steps` steps were taken
    pub fn run(&mut self, max_steps: usize) -> RunStatistics {
        self.run_with(max_steps, |_, _| {})
    }

    /// Like [`Simulation::run`], calling `on_step` with the step number and outcome
    pub fn run_with<F>(&mut self, max_steps: usize, mut on_step: F) -> RunStatistics
    where
        F: FnMut(usize, &StepOutcome),
    {
        let mut statistics = RunStatistics::new();

        for step in 1..=max_steps {
            let outcome = self.step();
            statistics.record(&outcome);
            on_step(step, &outcome);
            if outcome.is_terminal() {
                break;
            }
        }

        statistics.finish(self.visited_count(), self.maze.cell_count());
        statistics
    }

    /// Forward a front-end command
    ///
    /// Returns the step outcome for [`Command::Step`] and `None` otherwise.
    ///
    /// # Errors
    ///
    /// Propagates generator errors from [`Command::Regenerate`].
    pub fn apply(&mut self, command: Command) -> Result<Option<StepOutcome>> {
        match command {
            Command::Step => return Ok(Some(self.step())),
            Command::ToggleAutoRun => {
                self.toggle_auto_run();
            }
            Command::Reset => self.reset(),
            Command::Regenerate => self.generate_new(self.seed.wrapping_add(1))?,
        }
        Ok(None)
    }

    /// Wall flags of a cell in the chosen maze, all closed outside the grid
    pub fn cell_walls(&self, x: i32, y: i32, knowledge: Knowledge) -> Walls {
        let position = Position::new(x, y);
        match knowledge {
            Knowledge::True => self.maze.walls(position),
            Knowledge::Discovered => self.discovered.walls(position),
        }
    }

    /// Whether the robot has entered a cell, false outside the grid
    pub fn is_visited(&self, x: i32, y: i32) -> bool {
        self.discovered.is_visited(Position::new(x, y))
    }

    /// Number of cells entered so far, start included
    pub fn visited_count(&self) -> usize {
        self.visited_positions().len()
    }

    /// Robot position and heading
    pub const fn robot_state(&self) -> RobotState {
        self.robot.state()
    }

    /// Cells departed during forward exploration, oldest first
    pub fn exploration_stack(&self) -> &[Position] {
        self.robot.exploration_stack()
    }

    /// Whether the robot stands on the goal
    pub fn is_complete(&self) -> bool {
        self.robot.position() == self.solver.goal()
    }

    /// Whether exploration ran out of candidates before reaching the goal
    pub fn is_stuck(&self) -> bool {
        self.solver.state() == SolverState::Stuck
    }

    /// Solver lifecycle state
    pub const fn status(&self) -> SolverState {
        self.solver.state()
    }

    /// Start cell
    pub const fn start(&self) -> Position {
        self.config.start()
    }

    /// Goal cell
    pub const fn goal(&self) -> Position {
        self.solver.goal()
    }

    /// Grid dimensions as `(rows, cols)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.config.rows, self.config.cols)
    }

    /// Configuration the simulation was built with
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed of the current maze
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of moves and backtracks since the last reset
    pub const fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Ground-truth maze
    pub const fn maze(&self) -> &Grid {
        &self.maze
    }

    /// Robot's knowledge of the maze
    pub const fn discovered(&self) -> &Grid {
        &self.discovered
    }

    /// Whether the front end should step automatically
    pub const fn is_auto_run(&self) -> bool {
        self.auto_run
    }

    /// Set the auto-run flag
    pub const fn set_auto_run(&mut self, auto_run: bool) {
        self.auto_run = auto_run;
    }

    /// Flip the auto-run flag, returning the new value
    pub const fn toggle_auto_run(&mut self) -> bool {
        self.auto_run = !self.auto_run;
        self.auto_run
    }

    /// Start recording transitions for GIF export
    ///
    /// Recording starts from the current state of the robot.
    pub fn enable_visualization(&mut self) {
        let state = self.robot.state();
        let mut capture = TraceCapture::new(state.position, state.heading);
        capture.mark_visited(self.visited_positions());
        self.visualization = Some(capture);
    }

    fn visited_positions(&self) -> Vec<Position> {
        self.discovered
            .positions()
            .filter(|&position| self.discovered.is_visited(position))
            .collect()
    }

    /// Export the recorded trace as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - No transition was recorded
    /// - GIF encoding or file creation fails
    pub fn export_visualization(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(MazeError::InvalidParameter {
                    parameter: "visualization",
                    value: "disabled".to_string(),
                    reason: "Visualization was not enabled for this run".to_string(),
                })
            },
            |viz| viz.export_gif(&self.maze, self.start(), self.goal(), output_path, frame_delay_ms),
        )
    }
}
