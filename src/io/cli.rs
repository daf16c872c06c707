//! Command-line interface for batch maze generation and exploration

use crate::algorithm::executor::{Simulation, SimulationConfig};
use crate::algorithm::solver::ExplorationPolicy;
use crate::analysis::statistics::{RunOutcome, RunStatistics};
use crate::io::configuration::{
    AUTO_STEP_INTERVAL_MS, DEFAULT_COLS, DEFAULT_MAX_STEPS, DEFAULT_ROWS, DEFAULT_RUNS,
    DEFAULT_SEED, OUTPUT_PREFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_simulation_as_png;
use crate::io::progress::ProgressManager;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Exploration policy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Try left, straight, right
    LeftStraightRight,
    /// Try left, straight, right, then reverse
    LeftStraightRightBack,
}

impl From<PolicyArg> for ExplorationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LeftStraightRight => Self::LeftStraightRight,
            PolicyArg::LeftStraightRightBack => Self::LeftStraightRightBack,
        }
    }
}

#[derive(Parser)]
#[command(name = "micromouse")]
#[command(
    author,
    version,
    about = "Generate random mazes and let a micromouse explore them"
)]
/// Command-line arguments for the simulator
pub struct Cli {
    /// Number of maze rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of maze columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Random seed of the first maze
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of mazes to run, using consecutive seeds
    #[arg(short = 'n', long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Step budget per maze
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_STEPS)]
    pub steps: usize,

    /// Order in which the robot tries open neighbours
    #[arg(short, long, value_enum, default_value_t = PolicyArg::LeftStraightRight)]
    pub policy: PolicyArg,

    /// Directory receiving a PNG snapshot of every finished run
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also write an animated GIF replay of every run
    #[arg(short, long)]
    pub visualize: bool,

    /// GIF frame delay in milliseconds
    #[arg(short = 'd', long, default_value_t = AUTO_STEP_INTERVAL_MS)]
    pub frame_delay: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Simulation configuration described by the arguments
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig::new(self.rows, self.cols).with_policy(self.policy.into())
    }

    /// Directory that receives exported images
    pub fn output_dir(&self) -> &Path {
        self.output.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Check arguments that clap cannot validate on its own
    ///
    /// # Errors
    ///
    /// Returns an error if the run count, step budget or frame delay is zero,
    /// or if the grid dimensions are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(invalid_parameter(
                "runs",
                &self.runs,
                &"at least one run is required",
            ));
        }
        if self.steps == 0 {
            return Err(invalid_parameter(
                "steps",
                &self.steps,
                &"step budget must be positive",
            ));
        }
        if self.frame_delay == 0 {
            return Err(invalid_parameter(
                "frame_delay",
                &self.frame_delay,
                &"frame delay must be positive",
            ));
        }
        self.simulation_config().validate()
    }

    /// Seeds processed, one per run
    pub fn seeds(&self) -> impl Iterator<Item = u64> + use<> {
        let first = self.seed;
        (0..self.runs as u64).map(move |offset| first.wrapping_add(offset))
    }
}

/// Result of one run of the batch
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Seed of the maze
    pub seed: u64,
    /// Statistics of the exploration
    pub statistics: RunStatistics,
}

/// Orchestrates batch runs over consecutive seeds with progress tracking
pub struct SimulationRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SimulationRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run every seed according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, maze generation or image
    /// export fails
    pub fn process(&mut self) -> Result<Vec<RunReport>> {
        self.cli.validate()?;

        let seeds: Vec<u64> = self.cli.seeds().collect();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(seeds.len());
        }

        let mut reports = Vec::with_capacity(seeds.len());
        for (index, &seed) in seeds.iter().enumerate() {
            reports.push(self.run_seed(index, seed)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        let completed = reports
            .iter()
            .filter(|report| report.statistics.outcome == RunOutcome::Completed)
            .count();
        log::info!("{completed}/{} mazes solved", reports.len());

        Ok(reports)
    }

    fn run_seed(&mut self, index: usize, seed: u64) -> Result<RunReport> {
        let mut simulation = Simulation::with_config(self.cli.simulation_config(), seed)?;
        if self.cli.visualize {
            simulation.enable_visualization();
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_run(index, seed, self.cli.steps);
        }

        let progress = &mut self.progress_manager;
        let statistics = simulation.run_with(self.cli.steps, |step, _| {
            if let Some(pm) = progress.as_mut() {
                pm.update_step(index, step);
            }
        });

        log::info!("Seed {seed}: {statistics}");

        if self.cli.output.is_some() {
            export_simulation_as_png(&simulation, &self.snapshot_path(seed))?;
        }

        if self.cli.visualize && simulation.steps_taken() > 0 {
            simulation.export_visualization(&self.visualization_path(seed), self.cli.frame_delay)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_run(index, &statistics.outcome.to_string());
        }

        Ok(RunReport { seed, statistics })
    }

    /// Path of the PNG snapshot for `seed`
    pub fn snapshot_path(&self, seed: u64) -> PathBuf {
        self.cli
            .output_dir()
            .join(format!("{OUTPUT_PREFIX}_{seed}.png"))
    }

    /// Path of the GIF replay for `seed`
    pub fn visualization_path(&self, seed: u64) -> PathBuf {
        self.cli
            .output_dir()
            .join(format!("{OUTPUT_PREFIX}_{seed}.gif"))
    }
}
