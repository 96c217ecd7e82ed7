//! Sheep: randomly wandering prey.

use crate::geometry::{Direction, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 1-based sequence number, unique within a population
pub type SheepId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheep {
    id: SheepId,
    pub position: Position,
    move_step: f64,
}

impl Sheep {
    /// Create a sheep at a uniformly random position in
    /// `[-init_pos_limit, init_pos_limit]` on both axes.
    ///
    /// `move_step` and `init_pos_limit` must be positive; callers validate
    /// them through [`crate::Config::validate`].
    pub fn spawn<R: Rng + ?Sized>(
        id: SheepId,
        move_step: f64,
        init_pos_limit: f64,
        rng: &mut R,
    ) -> Self {
        let x = rng.gen_range(-init_pos_limit..=init_pos_limit);
        let y = rng.gen_range(-init_pos_limit..=init_pos_limit);
        let sheep = Self::at(id, Position::new(x, y), move_step);
        log::debug!("Sheep number {} initialized on position {}.", id, sheep.position);
        sheep
    }

    /// Place a sheep at a fixed position
    pub fn at(id: SheepId, position: Position, move_step: f64) -> Self {
        Self {
            id,
            position,
            move_step,
        }
    }

    pub fn id(&self) -> SheepId {
        self.id
    }

    pub fn move_step(&self) -> f64 {
        self.move_step
    }

    /// Move exactly `move_step` units in a random axis direction.
    /// Positions are not clamped.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Direction {
        let direction = Direction::random(rng);
        let (dx, dy) = direction.offset(self.move_step);
        self.position.x += dx;
        self.position.y += dy;

        log::debug!(
            "Sheep number {} chose direction '{}' and moved to position {}.",
            self.id,
            direction,
            self.position
        );
        direction
    }
}
