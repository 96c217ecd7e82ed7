//! The wolf: a single predator that hunts the nearest sheep.

use crate::geometry::Position;
use crate::population::Population;
use crate::sheep::SheepId;
use serde::{Deserialize, Serialize};

/// Nearest live sheep as seen from the wolf
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub sheep: SheepId,
    pub position: Position,
    pub distance: f64,
}

/// What the wolf did during a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WolfAction {
    /// Sheep was within reach and got eaten
    Captured(SheepId),
    /// Wolf stepped towards this sheep
    Chasing(SheepId),
    /// No live sheep left
    Idle,
}

impl WolfAction {
    pub fn target(&self) -> Option<SheepId> {
        match *self {
            WolfAction::Captured(id) | WolfAction::Chasing(id) => Some(id),
            WolfAction::Idle => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, WolfAction::Captured(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wolf {
    pub position: Position,
    move_step: f64,
}

impl Wolf {
    /// Wolf at the origin
    pub fn new(move_step: f64) -> Self {
        Self::at(Position::ORIGIN, move_step)
    }

    pub fn at(position: Position, move_step: f64) -> Self {
        Self {
            position,
            move_step,
        }
    }

    pub fn move_step(&self) -> f64 {
        self.move_step
    }

    pub fn distance_to(&self, position: Position) -> f64 {
        self.position.distance_to(position)
    }

    /// Linear scan for the closest live sheep.
    ///
    /// Ties go to the sheep that comes first in population order.
    pub fn find_nearest(&self, population: &Population) -> Option<Target> {
        let mut nearest: Option<Target> = None;

        for sheep in population.live() {
            let distance = self.distance_to(sheep.position);
            if nearest.map_or(true, |t| distance < t.distance) {
                nearest = Some(Target {
                    sheep: sheep.id(),
                    position: sheep.position,
                    distance,
                });
            }
        }

        if let Some(target) = &nearest {
            log::debug!(
                "Wolf determined the shortest distance is to sheep number {} with value: {:.3}.",
                target.sheep,
                target.distance
            );
        }
        nearest
    }

    /// Capture the nearest sheep if it is within one step, otherwise move
    /// one step towards it.
    pub fn act(&mut self, population: &mut Population) -> WolfAction {
        let Some(target) = self.find_nearest(population) else {
            log::info!("The wolf found no sheep to chase.");
            return WolfAction::Idle;
        };

        // Must be decided before any direction is computed: distance 0 always lands here.
        let action = if target.distance <= self.move_step {
            self.position = target.position;
            population.remove(target.sheep);
            log::info!("The wolf has eaten sheep number {}.", target.sheep);
            WolfAction::Captured(target.sheep)
        } else {
            self.step_towards(target);
            log::info!("The wolf is chasing sheep number {}.", target.sheep);
            WolfAction::Chasing(target.sheep)
        };

        log::debug!("The wolf moved to position {}.", self.position);
        action
    }

    fn step_towards(&mut self, target: Target) {
        let scale = self.move_step / target.distance;
        self.position.x += (target.position.x - self.position.x) * scale;
        self.position.y += (target.position.y - self.position.y) * scale;
    }
}
