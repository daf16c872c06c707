//! Multi-run progress tracking with automatic batching for large seed ranges

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for batch runs
///
/// Automatically switches between individual progress bars (for a few runs)
/// and an additional batch progress bar (for many runs) based on run count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    run_bars: Vec<ProgressBar>,
    run_count: usize,
    /// Stores (`label`, `current_step`, `step_budget`) for rolling window display
    run_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Mazes: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            run_bars: Vec::new(),
            run_count: 0,
            run_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on run count
    pub fn initialize(&mut self, run_count: usize) {
        self.run_count = run_count;

        // Switch to batch mode for large seed ranges to avoid terminal spam
        if run_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(run_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = run_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.run_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of runs the manager was initialized for
    pub const fn run_count(&self) -> usize {
        self.run_count
    }

    /// Configure progress bar for a new run
    pub fn start_run(&mut self, index: usize, seed: u64, step_budget: usize) {
        if index >= self.run_states.len() {
            self.run_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.run_states.get_mut(index) {
            *state = (format!("seed {seed}"), 0, step_budget);
        }
        self.update_bars();
    }

    /// Report the current step of a run
    pub fn update_step(&mut self, index: usize, step: usize) {
        if let Some(state) = self.run_states.get_mut(index) {
            state.1 = step;
        }
        self.update_bars();
    }

    /// Mark run as finished with a short outcome label
    pub fn complete_run(&mut self, index: usize, outcome: &str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.run_states.get_mut(index) {
            state.0 = format!("✓ {} ({outcome})", state.0);
            state.2 = state.1;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All mazes explored");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active runs
    fn update_bars(&self) {
        let active_runs: Vec<&(String, usize, usize)> = self
            .run_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .collect();

        let start_idx = active_runs
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_runs = active_runs.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, current, max)) in visible_runs.iter().enumerate() {
            if let Some(bar) = self.run_bars.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max}"));
                bar.set_prefix(label.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible_runs.len()..self.run_bars.len() {
            if let Some(bar) = self.run_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
