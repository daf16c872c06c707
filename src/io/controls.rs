//! Key bindings and auto-step pacing for interactive front ends
//!
//! The simulation itself has no notion of time or input. A front end owns a
//! [`KeyBindings`] table to turn key presses into [`Command`]s and an
//! [`AutoStepper`] to decide how many steps are due while auto-run is on.

use std::time::Duration;

use crate::algorithm::executor::Command;
use crate::io::configuration::AUTO_STEP_INTERVAL_MS;
use crate::io::error::{Result, invalid_parameter};

/// Mapping from keys to simulation commands
///
/// Keys compare case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Key performing one step
    pub step: char,
    /// Key flipping auto-run
    pub toggle_auto_run: char,
    /// Key generating a new maze
    pub regenerate: char,
    /// Key restarting exploration on the current maze
    pub reset: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            step: ' ',
            toggle_auto_run: 'a',
            regenerate: 'r',
            reset: 'x',
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`, if any
    pub fn command_for(&self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        self.bindings()
            .into_iter()
            .find(|(bound, _)| bound.to_ascii_lowercase() == key)
            .map(|(_, command)| command)
    }

    /// Check that no key is bound twice
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first duplicated key.
    pub fn validate(&self) -> Result<()> {
        let bindings = self.bindings();
        for (index, (key, _)) in bindings.iter().enumerate() {
            let duplicated = bindings
                .iter()
                .skip(index + 1)
                .any(|(other, _)| other.to_ascii_lowercase() == key.to_ascii_lowercase());
            if duplicated {
                return Err(invalid_parameter(
                    "key_bindings",
                    &format!("{key:?}"),
                    &"key is bound to more than one command",
                ));
            }
        }
        Ok(())
    }

    const fn bindings(&self) -> [(char, Command); 4] {
        [
            (self.step, Command::Step),
            (self.toggle_auto_run, Command::ToggleAutoRun),
            (self.regenerate, Command::Regenerate),
            (self.reset, Command::Reset),
        ]
    }
}

/// Converts elapsed wall-clock time into a number of due auto-steps
///
/// Leftover time below one interval carries over to the next call, so the
/// step rate does not drift with the caller's frame rate.
#[derive(Debug, Clone)]
pub struct AutoStepper {
    interval: Duration,
    accumulated: Duration,
}

impl Default for AutoStepper {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(u64::from(AUTO_STEP_INTERVAL_MS)),
            accumulated: Duration::ZERO,
        }
    }
}

impl AutoStepper {
    /// Create a stepper firing every `interval_ms` milliseconds
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if `interval_ms` is zero.
    pub fn new(interval_ms: u32) -> Result<Self> {
        if interval_ms == 0 {
            return Err(invalid_parameter(
                "interval_ms",
                &interval_ms,
                &"auto-step interval must be positive",
            ));
        }
        Ok(Self {
            interval: Duration::from_millis(u64::from(interval_ms)),
            accumulated: Duration::ZERO,
        })
    }

    /// Interval between two steps
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` and return how many steps became due
    ///
    /// The count saturates at `u32::MAX`; the remainder is always shorter
    /// than one interval.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let total = self.accumulated.saturating_add(elapsed).as_nanos();
        let interval = self.interval.as_nanos().max(1);
        let remainder = u64::try_from(total % interval).unwrap_or(u64::MAX);
        self.accumulated = Duration::from_nanos(remainder);
        u32::try_from(total / interval).unwrap_or(u32::MAX)
    }

    /// Drop any partially elapsed interval
    pub const fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
