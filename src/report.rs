//! Human-facing run output: start summary, per-round status and the
//! reason a run stopped.

use crate::geometry::Position;
use crate::wolf::WolfAction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub wolf: Position,
    pub alive: usize,
    pub action: WolfAction,
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Round {} ---", self.round)?;
        writeln!(f, "    Wolf position: {}", self.wolf)?;
        write!(f, "    Alive sheep count: {}", self.alive)?;
        match self.action {
            WolfAction::Captured(id) => write!(f, "\n    Wolf has eaten sheep number {}", id),
            WolfAction::Chasing(id) => write!(f, "\n    Wolf is chasing sheep number {}", id),
            WolfAction::Idle => Ok(()),
        }
    }
}

/// Printed once before the first round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartSummary {
    pub wolf: Position,
    pub max_rounds: u32,
    pub sheep_count: usize,
}

impl fmt::Display for StartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start info")?;
        writeln!(f, "Wolf initial position: {}", self.wolf)?;
        writeln!(f, "Rounds: {}", self.max_rounds)?;
        write!(f, "Sheep number: {}", self.sheep_count)
    }
}

/// Why a run stopped. Both are normal endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    MaxRounds,
    AllCaptured,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::MaxRounds => {
                f.write_str("Simulation terminated, because maximum number of rounds has been reached.")
            }
            Termination::AllCaptured => {
                f.write_str("Simulation terminated, because all sheep have been eaten.")
            }
        }
    }
}
