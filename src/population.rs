//! Fixed-order collection of sheep slots.
//!
//! Slot `i` always belongs to sheep number `i + 1`. A captured sheep leaves
//! its slot [`Slot::Absent`] for the rest of the run.

use crate::geometry::Position;
use crate::sheep::{Sheep, SheepId};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Slot {
    Live(Sheep),
    Absent,
}

impl Slot {
    pub fn sheep(&self) -> Option<&Sheep> {
        match self {
            Slot::Live(sheep) => Some(sheep),
            Slot::Absent => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Slot::Live(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    slots: Vec<Slot>,
}

impl Population {
    /// Spawn `count` sheep numbered `1..=count` at random positions.
    ///
    /// Ids are never reused, so at most `SheepId::MAX` sheep are spawned;
    /// [`crate::Config::validate`] rejects larger counts.
    pub fn spawn<R: Rng + ?Sized>(
        count: usize,
        move_step: f64,
        init_pos_limit: f64,
        rng: &mut R,
    ) -> Self {
        let slots = (1..=SheepId::MAX)
            .take(count)
            .map(|id| Slot::Live(Sheep::spawn(id, move_step, init_pos_limit, rng)))
            .collect();
        Self { slots }
    }

    /// Build a population from explicit positions, numbered in order
    pub fn from_positions(positions: &[Position], move_step: f64) -> Self {
        let slots = positions
            .iter()
            .zip(1..)
            .map(|(&pos, id)| Slot::Live(Sheep::at(id, pos, move_step)))
            .collect();
        Self { slots }
    }

    /// Number of slots, live or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Live sheep in population order
    pub fn live(&self) -> impl Iterator<Item = &Sheep> {
        self.slots.iter().filter_map(Slot::sheep)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_live()).count()
    }

    pub fn get(&self, id: SheepId) -> Option<&Sheep> {
        self.slot_index(id).and_then(|idx| self.slots[idx].sheep())
    }

    /// Mark sheep `id` absent and hand it back. Returns `None` if it was
    /// already absent or never existed.
    pub fn remove(&mut self, id: SheepId) -> Option<Sheep> {
        let idx = self.slot_index(id)?;
        match std::mem::replace(&mut self.slots[idx], Slot::Absent) {
            Slot::Live(sheep) => Some(sheep),
            Slot::Absent => None,
        }
    }

    /// Step every live sheep once, in population order
    pub fn step_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for slot in &mut self.slots {
            if let Slot::Live(sheep) = slot {
                sheep.step(rng);
            }
        }
    }

    /// Per-slot positions, `None` for absent sheep
    pub fn positions(&self) -> Vec<Option<Position>> {
        self.slots
            .iter()
            .map(|slot| slot.sheep().map(|s| s.position))
            .collect()
    }

    fn slot_index(&self, id: SheepId) -> Option<usize> {
        let idx = (id as usize).checked_sub(1)?;
        (idx < self.slots.len()).then_some(idx)
    }
}
