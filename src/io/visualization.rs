//! Transition capture and GIF replay of an exploration run

use std::path::Path;

use image::{Delay, Frame};

use crate::algorithm::bitset::CellSet;
use crate::algorithm::solver::{RobotState, StepOutcome, Transition};
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{MazeError, Result, invalid_parameter};
use crate::io::image::{Markers, Scale, render_maze};
use crate::spatial::{Direction, Grid, Position};

/// One recorded robot movement
#[derive(Debug, Clone, Copy)]
pub struct TraceEvent {
    /// The movement itself
    pub transition: Transition,
    /// Whether the movement retraced a dead end
    pub backtrack: bool,
    /// Step number at which it happened
    pub step: usize,
}

/// Records robot transitions to replay them as an animation
///
/// Only movements are stored; visited shading is rebuilt while replaying,
/// since every forward move marks exactly the cell it enters.
pub struct TraceCapture {
    pub(crate) events: Vec<TraceEvent>,
    initial: RobotState,
    initially_visited: Vec<Position>,
}

impl TraceCapture {
    /// Start a capture with the robot at `position` facing `heading`
    ///
    /// The starting cell counts as visited.
    pub fn new(position: Position, heading: Direction) -> Self {
        Self {
            events: Vec::new(),
            initial: RobotState { position, heading },
            initially_visited: vec![position],
        }
    }

    /// Declare cells already visited when the capture started
    pub fn mark_visited(&mut self, positions: impl IntoIterator<Item = Position>) {
        self.initially_visited.extend(positions);
    }

    /// Drop all events and start over from a new robot pose
    pub fn restart(&mut self, position: Position, heading: Direction) {
        *self = Self::new(position, heading);
    }

    /// Record a step outcome; terminal outcomes carry no movement and are skipped
    pub fn record(&mut self, outcome: &StepOutcome, step: usize) {
        let (transition, backtrack) = match outcome {
            StepOutcome::Moved(transition) => (*transition, false),
            StepOutcome::Backtracked(transition) => (*transition, true),
            StepOutcome::Completed | StepOutcome::Stuck => return,
        };
        self.events.push(TraceEvent {
            transition,
            backtrack,
            step,
        });
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured run as a GIF with automatic frame skipping
    ///
    /// Frames faster than [`VIEWER_MIN_FRAME_DELAY_MS`] are coalesced: with a
    /// requested delay of 10ms only every 5th frame is kept and shown for 50ms,
    /// which keeps the apparent speed of the robot. Frames are rendered one at
    /// a time while encoding, and large grids are drawn with smaller cells.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No transition was captured
    /// - `frame_delay_ms` is zero
    /// - The grid is too large to draw
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        maze: &Grid,
        start: Position,
        goal: Position,
        output_path: &Path,
        frame_delay_ms: u32,
    ) -> Result<()> {
        if self.events.is_empty() {
            return Err(MazeError::EmptyTrace);
        }
        if frame_delay_ms == 0 {
            return Err(invalid_parameter(
                "frame_delay_ms",
                &frame_delay_ms,
                &"frame delay must be positive",
            ));
        }
        let scale = Scale::for_grid(maze)?;

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1) as usize;

        let frames = self.replay(
            maze,
            Markers {
                start,
                goal,
                robot: self.initial,
            },
            scale,
            effective_delay_ms,
            skip_factor,
        );

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| MazeError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| MazeError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }

    fn replay<'a>(
        &'a self,
        maze: &'a Grid,
        markers: Markers,
        scale: Scale,
        delay_ms: u32,
        skip_factor: usize,
    ) -> FrameReplay<'a> {
        let mut visited = CellSet::for_grid(maze);
        for &position in &self.initially_visited {
            visited.insert(position);
        }

        FrameReplay {
            maze,
            events: &self.events,
            visited,
            markers,
            scale,
            delay_ms,
            skip_factor,
            cursor: 0,
            stage: ReplayStage::Initial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayStage {
    Initial,
    Events,
    Hold,
    Done,
}

/// Lazily renders one frame per `skip_factor` events, then a held final frame
struct FrameReplay<'a> {
    maze: &'a Grid,
    events: &'a [TraceEvent],
    visited: CellSet,
    markers: Markers,
    scale: Scale,
    delay_ms: u32,
    skip_factor: usize,
    cursor: usize,
    stage: ReplayStage,
}

impl FrameReplay<'_> {
    fn render(&self, delay_ms: u32) -> Frame {
        let img = render_maze(
            self.maze,
            |position| self.visited.contains(position),
            &self.markers,
            self.scale,
        );
        Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    }
}

impl Iterator for FrameReplay<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        match self.stage {
            ReplayStage::Initial => {
                self.stage = if self.events.is_empty() {
                    ReplayStage::Hold
                } else {
                    ReplayStage::Events
                };
                Some(self.render(self.delay_ms))
            }
            ReplayStage::Events => {
                let end = self
                    .cursor
                    .saturating_add(self.skip_factor)
                    .min(self.events.len());
                for event in self.events.get(self.cursor..end).unwrap_or_default() {
                    if !event.backtrack {
                        self.visited.insert(event.transition.to);
                    }
                    self.markers.robot = RobotState {
                        position: event.transition.to,
                        heading: event.transition.heading,
                    };
                }
                self.cursor = end;
                if end == self.events.len() {
                    self.stage = ReplayStage::Hold;
                }
                Some(self.render(self.delay_ms))
            }
            // Final frame displays longer for better visibility
            ReplayStage::Hold => {
                self.stage = ReplayStage::Done;
                Some(self.render(self.delay_ms.saturating_mul(FINAL_FRAME_HOLD)))
            }
            ReplayStage::Done => None,
        }
    }
}
