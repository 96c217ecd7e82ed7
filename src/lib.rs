//! # chase
//!
//! Discrete-time pursuit simulation: a wolf hunts the nearest of a flock
//! of randomly wandering sheep until it has eaten them all or the round
//! limit is reached.
//!
//! ## Quick Start
//!
//! ```rust
//! use chase::{Config, Simulation};
//!
//! let config = Config::default();
//! let mut sim = Simulation::new_with_seed(&config, 42).unwrap();
//!
//! while let Some(report) = sim.run_round() {
//!     println!("{}", report);
//! }
//! println!("{:?}", sim.termination());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chase::Config;
//!
//! let mut config = Config::default();
//! config.simulation.sheep_count = 30;
//! config.wolf.move_dist = 1.5;
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Run artifacts
//!
//! ```rust,no_run
//! use chase::{Config, RunRecorder, Simulation};
//!
//! let mut sim = Simulation::new(&Config::default()).unwrap();
//! let mut recorder = RunRecorder::new("pos.json", "alive.csv");
//! sim.run_with_callback(|sim, _| recorder.record(sim));
//! ```

pub mod config;
pub mod geometry;
pub mod population;
pub mod report;
pub mod sheep;
pub mod snapshot;
pub mod wolf;
pub mod world;

// Re-export main types
pub use config::{Config, ConfigError};
pub use geometry::{Direction, Position};
pub use population::{Population, Slot};
pub use report::{RoundReport, StartSummary, Termination};
pub use sheep::{Sheep, SheepId};
pub use snapshot::{AliveRecord, RoundSnapshot, RunRecorder, SnapshotError};
pub use wolf::{Target, Wolf, WolfAction};
pub use world::Simulation;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
