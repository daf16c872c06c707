//! Partial-knowledge exploration, one robot decision per call
//!
//! The solver only ever reads the discovered maze when deciding. Walls of the
//! current cell are copied in from the true maze right before each decision,
//! so the robot knows exactly what it has sensed and nothing more.
//!
//! Forward moves push the departed cell on the exploration stack; dead ends
//! pop it and retrace one cell. Every popped cell is adjacent to the robot, as
//! each push happens right before a one-cell move away from the pushed cell.

use std::fmt;

use crate::algorithm::sensing::sense_and_record;
use crate::spatial::{Direction, Grid, Position, Turn};

/// Order in which open neighbours are considered for exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExplorationPolicy {
    /// Left, straight, right relative to the heading
    ///
    /// A cell directly behind the robot is only reached after backtracking
    /// reorients it, so an opening behind the start cell can leave the robot
    /// stuck.
    #[default]
    LeftStraightRight,
    /// Left, straight, right, then reverse
    ///
    /// Every open unvisited neighbour is a candidate, which makes the
    /// exploration a complete depth-first search.
    LeftStraightRightBack,
}

impl ExplorationPolicy {
    /// Candidate directions in priority order for a robot facing `heading`
    pub fn candidates(self, heading: Direction) -> impl Iterator<Item = Direction> {
        let count = match self {
            Self::LeftStraightRight => 3,
            Self::LeftStraightRightBack => 4,
        };
        [heading.left(), heading, heading.right(), heading.behind()]
            .into_iter()
            .take(count)
    }
}

impl fmt::Display for ExplorationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftStraightRight => f.write_str("left-straight-right"),
            Self::LeftStraightRightBack => f.write_str("left-straight-right-back"),
        }
    }
}

/// Read-only snapshot of the robot for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotState {
    /// Current cell
    pub position: Position,
    /// Current heading
    pub heading: Direction,
}

/// Robot pose plus the exploration stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    position: Position,
    heading: Direction,
    exploration_stack: Vec<Position>,
}

impl Robot {
    /// Place a robot on `start`; the exploration stack holds only `start`
    pub fn new(start: Position, heading: Direction) -> Self {
        Self {
            position: start,
            heading,
            exploration_stack: vec![start],
        }
    }

    /// Current cell
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current heading
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Position and heading
    pub const fn state(&self) -> RobotState {
        RobotState {
            position: self.position,
            heading: self.heading,
        }
    }

    /// Cells departed during forward exploration, oldest first
    pub fn exploration_stack(&self) -> &[Position] {
        &self.exploration_stack
    }

    /// Move forward into an unexplored neighbour and mark it visited
    fn advance(&mut self, direction: Direction, discovered: &mut Grid) -> Transition {
        let from = self.position;
        self.exploration_stack.push(from);
        let transition = self.travel(direction);
        discovered.mark_visited(transition.to);
        transition
    }

    /// Retrace one cell towards `target`, which must be adjacent
    fn retreat(&mut self, target: Position) -> Option<Transition> {
        let direction = Direction::between(self.position, target)?;
        Some(self.travel(direction))
    }

    fn travel(&mut self, direction: Direction) -> Transition {
        let from = self.position;
        let turn = self.heading.turn_to(direction);
        self.heading = turn.apply(self.heading);
        self.position = from.step(direction);
        Transition {
            from,
            to: self.position,
            heading: self.heading,
            turn,
        }
    }
}

/// One robot move between adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Cell left
    pub from: Position,
    /// Cell entered
    pub to: Position,
    /// Heading after the turn, pointing from `from` to `to`
    pub heading: Direction,
    /// Rotation performed before moving
    pub turn: Turn,
}

/// Result of a single solver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Entered an unvisited neighbour
    Moved(Transition),
    /// Retraced one cell out of a dead end
    Backtracked(Transition),
    /// The robot stands on the goal
    Completed,
    /// Every reachable candidate is exhausted and the robot is back at the start
    Stuck,
}

impl StepOutcome {
    /// Movement carried by this outcome, if any
    pub const fn transition(&self) -> Option<&Transition> {
        match self {
            Self::Moved(transition) | Self::Backtracked(transition) => Some(transition),
            Self::Completed | Self::Stuck => None,
        }
    }

    /// Whether further steps can no longer change anything
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stuck)
    }
}

/// Solver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverState {
    /// Still looking for the goal
    #[default]
    Exploring,
    /// Goal reached, steps are no-ops
    Completed,
    /// Search exhausted without reaching the goal, steps are no-ops
    Stuck,
}

/// Exploration state machine
#[derive(Debug, Clone)]
pub struct Solver {
    goal: Position,
    policy: ExplorationPolicy,
    state: SolverState,
}

impl Solver {
    /// Create a solver heading for `goal`
    pub const fn new(goal: Position, policy: ExplorationPolicy) -> Self {
        Self {
            goal,
            policy,
            state: SolverState::Exploring,
        }
    }

    /// Goal cell
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Candidate ordering in use
    pub const fn policy(&self) -> ExplorationPolicy {
        self.policy
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Perform exactly one transition
    ///
    /// Terminal states are sticky: once `Completed` or `Stuck` has been
    /// reported, further calls return the same outcome and touch nothing.
    pub fn step(
        &mut self,
        robot: &mut Robot,
        true_maze: &Grid,
        discovered: &mut Grid,
    ) -> StepOutcome {
        match self.state {
            SolverState::Completed => return StepOutcome::Completed,
            SolverState::Stuck => return StepOutcome::Stuck,
            SolverState::Exploring => {}
        }

        if robot.position == self.goal {
            self.state = SolverState::Completed;
            log::info!("Maze completed, goal {} reached", self.goal);
            return StepOutcome::Completed;
        }

        sense_and_record(true_maze, discovered, robot.position);

        if let Some(direction) = self.choose_unvisited(robot, discovered) {
            let transition = robot.advance(direction, discovered);
            log::debug!(
                "Moved {} -> {} facing {} ({:?})",
                transition.from,
                transition.to,
                transition.heading,
                transition.turn
            );
            return StepOutcome::Moved(transition);
        }

        if robot.exploration_stack.len() > 1
            && let Some(target) = robot.exploration_stack.pop()
        {
            if let Some(transition) = robot.retreat(target) {
                log::debug!(
                    "Backtracked {} -> {} facing {}",
                    transition.from,
                    transition.to,
                    transition.heading
                );
                return StepOutcome::Backtracked(transition);
            }
            log::warn!(
                "Exploration stack entry {target} is not adjacent to {}",
                robot.position
            );
        }

        self.state = SolverState::Stuck;
        log::info!(
            "Exploration exhausted at {} without reaching goal {}",
            robot.position,
            self.goal
        );
        StepOutcome::Stuck
    }

    /// First candidate that is open in the discovered maze and not yet visited
    fn choose_unvisited(&self, robot: &Robot, discovered: &Grid) -> Option<Direction> {
        let position = robot.position;
        self.policy.candidates(robot.heading).find(|&direction| {
            !discovered.wall_at(position, direction)
                && !discovered.is_visited(position.step(direction))
        })
    }
}
