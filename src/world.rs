//! Round engine - owns the flock and the wolf and advances them one
//! round at a time.

use crate::config::{Config, ConfigError};
use crate::population::Population;
use crate::report::{RoundReport, StartSummary, Termination};
use crate::wolf::Wolf;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A single pursuit run
pub struct Simulation {
    population: Population,
    wolf: Wolf,

    // State
    round: u32,
    max_rounds: u32,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// Create a simulation with a random seed
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self::new_with_seed(config, seed)
    }

    /// Create a simulation with a specific seed for reproducibility
    pub fn new_with_seed(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = Population::spawn(
            config.simulation.sheep_count,
            config.sheep.move_dist,
            config.sheep.init_pos_limit,
            &mut rng,
        );
        log::info!("Initial position of all sheep determined.");

        Ok(Self {
            population,
            wolf: Wolf::new(config.wolf.move_dist),
            round: 0,
            max_rounds: config.simulation.max_rounds,
            rng,
            seed,
        })
    }

    /// Assemble a simulation around an existing flock and wolf.
    ///
    /// Unlike [`Simulation::new`] the flock may be empty; such a run is
    /// terminated before its first round.
    pub fn from_parts(
        max_rounds: u32,
        population: Population,
        wolf: Wolf,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if max_rounds == 0 {
            return Err(ConfigError::Invalid("max_rounds must be > 0".to_string()));
        }
        let step = wolf.move_step();
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "wolf.move_dist must be a finite value > 0, got {}",
                step
            )));
        }

        Ok(Self {
            population,
            wolf,
            round: 0,
            max_rounds,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        })
    }

    /// Play one round: every live sheep steps, then the wolf acts once.
    ///
    /// Returns `None` without touching any state once the run has terminated.
    pub fn run_round(&mut self) -> Option<RoundReport> {
        if !self.should_continue() {
            return None;
        }

        self.round += 1;
        log::info!("Started round {}.", self.round);

        self.population.step_all(&mut self.rng);
        log::info!("All alive sheep moved.");

        let action = self.wolf.act(&mut self.population);
        let alive = self.live_count();
        log::info!("Round {} ended with {} alive sheep.", self.round, alive);

        for reason in self.termination_reasons() {
            log::info!("{}", reason);
        }

        Some(RoundReport {
            round: self.round,
            wolf: self.wolf.position,
            alive,
            action,
        })
    }

    /// True while rounds remain and at least one sheep is alive
    pub fn should_continue(&self) -> bool {
        self.termination().is_none()
    }

    /// Reason the run is over, if it is. The round limit is checked first.
    pub fn termination(&self) -> Option<Termination> {
        self.termination_reasons().first().copied()
    }

    /// Every condition currently ending the run, round limit first.
    /// Both hold when the last sheep is eaten in the final round.
    pub fn termination_reasons(&self) -> Vec<Termination> {
        let mut reasons = Vec::with_capacity(2);
        if self.round >= self.max_rounds {
            reasons.push(Termination::MaxRounds);
        }
        if self.live_count() == 0 {
            reasons.push(Termination::AllCaptured);
        }
        reasons
    }

    /// Run until termination
    pub fn run(&mut self) -> Option<Termination> {
        self.run_with_callback(|_, _| {})
    }

    /// Run until termination, calling `callback` after every round
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Option<Termination>
    where
        F: FnMut(&Simulation, &RoundReport),
    {
        while let Some(report) = self.run_round() {
            callback(self, &report);
        }
        self.termination()
    }

    pub fn start_summary(&self) -> StartSummary {
        StartSummary {
            wolf: self.wolf.position,
            max_rounds: self.max_rounds,
            sheep_count: self.population.len(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.population.live_count()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn wolf(&self) -> &Wolf {
        &self.wolf
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::wolf::WolfAction;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.simulation.max_rounds = 200;
        config.simulation.sheep_count = 10;
        config
    }

    #[test]
    fn test_simulation_creation() {
        let config = test_config();
        let sim = Simulation::new_with_seed(&config, 1).unwrap();

        assert_eq!(sim.round(), 0);
        assert_eq!(sim.live_count(), 10);
        assert_eq!(sim.wolf().position, Position::ORIGIN);
        assert!(sim.should_continue());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = test_config();
        config.wolf.move_dist = -1.0;
        assert!(Simulation::new_with_seed(&config, 1).is_err());

        let mut config = test_config();
        config.sheep.init_pos_limit = 0.0;
        assert!(Simulation::new(&config).is_err());

        let mut config = test_config();
        config.sheep.init_pos_limit = 1e308;
        assert!(matches!(
            Simulation::new_with_seed(&config, 1),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_round_counter_and_monotone_population() {
        let config = test_config();
        let mut sim = Simulation::new_with_seed(&config, 42).unwrap();
        let mut last_alive = sim.live_count();
        let mut expected_round = 0;

        while let Some(report) = sim.run_round() {
            expected_round += 1;
            assert_eq!(report.round, expected_round);
            assert_eq!(sim.round(), expected_round);
            assert!(report.alive == last_alive || report.alive + 1 == last_alive);
            assert_eq!(report.action.is_capture(), report.alive + 1 == last_alive);
            last_alive = report.alive;
        }

        assert!(sim.round() <= sim.max_rounds());
        assert!(!sim.should_continue());
        assert!(sim.run_round().is_none());
        assert_eq!(sim.round(), expected_round);
    }

    #[test]
    fn test_single_round_limit() {
        let mut config = Config::default();
        config.simulation.max_rounds = 1;
        config.simulation.sheep_count = 1;
        let mut sim = Simulation::new_with_seed(&config, 3).unwrap();

        assert!(sim.run_round().is_some());
        assert!(!sim.should_continue());
        assert_eq!(sim.termination(), Some(Termination::MaxRounds));
    }

    #[test]
    fn test_fast_wolf_catches_in_first_round() {
        let mut config = Config::default();
        config.simulation.max_rounds = 10;
        config.simulation.sheep_count = 1;
        config.sheep.init_pos_limit = 2.0;
        config.sheep.move_dist = 0.5;
        // Worst case: corner at (2, 2) plus one sheep step, well inside 10.0
        config.wolf.move_dist = 10.0;

        for seed in 0..20 {
            let mut sim = Simulation::new_with_seed(&config, seed).unwrap();
            let report = sim.run_round().unwrap();
            assert_eq!(report.action, WolfAction::Captured(1));
            assert_eq!(report.alive, 0);
            assert_eq!(sim.termination(), Some(Termination::AllCaptured));
        }
    }

    #[test]
    fn test_round_limit_wins_over_capture() {
        let mut config = Config::default();
        config.simulation.max_rounds = 1;
        config.simulation.sheep_count = 1;
        config.sheep.init_pos_limit = 1.0;
        config.wolf.move_dist = 10.0;

        let mut sim = Simulation::new_with_seed(&config, 9).unwrap();
        sim.run_round();
        assert_eq!(sim.live_count(), 0);
        assert_eq!(sim.termination(), Some(Termination::MaxRounds));
        assert_eq!(
            sim.termination_reasons(),
            vec![Termination::MaxRounds, Termination::AllCaptured]
        );
    }

    #[test]
    fn test_empty_flock_terminates_immediately() {
        let mut sim =
            Simulation::from_parts(10, Population::default(), Wolf::new(1.0), 0).unwrap();

        assert_eq!(sim.live_count(), 0);
        assert!(!sim.should_continue());
        assert_eq!(sim.termination(), Some(Termination::AllCaptured));
        assert!(sim.run_round().is_none());
        assert_eq!(sim.round(), 0);
        assert_eq!(sim.termination_reasons(), vec![Termination::AllCaptured]);
    }

    #[test]
    fn test_from_parts_validation() {
        assert!(Simulation::from_parts(0, Population::default(), Wolf::new(1.0), 0).is_err());
        assert!(Simulation::from_parts(5, Population::default(), Wolf::new(0.0), 0).is_err());
    }

    #[test]
    fn test_reproducibility() {
        let config = test_config();
        let mut sim1 = Simulation::new_with_seed(&config, 2024).unwrap();
        let mut sim2 = Simulation::new_with_seed(&config, 2024).unwrap();

        let reports1: Vec<_> = std::iter::from_fn(|| sim1.run_round()).collect();
        let reports2: Vec<_> = std::iter::from_fn(|| sim2.run_round()).collect();

        assert_eq!(reports1, reports2);
        assert_eq!(sim1.population(), sim2.population());
        assert_eq!(sim1.seed(), 2024);
    }

    #[test]
    fn test_config_seed_is_used() {
        let mut config = test_config();
        config.simulation.seed = Some(77);
        let sim = Simulation::new(&config).unwrap();
        assert_eq!(sim.seed(), 77);
    }

    #[test]
    fn test_run_with_callback() {
        let config = test_config();
        let mut sim = Simulation::new_with_seed(&config, 5).unwrap();
        let mut rounds = Vec::new();

        let reason = sim.run_with_callback(|s, report| {
            assert_eq!(s.round(), report.round);
            rounds.push(report.round);
        });

        assert!(reason.is_some());
        assert_eq!(rounds.len() as u32, sim.round());
    }

    #[test]
    fn test_start_summary() {
        let config = Config::default();
        let sim = Simulation::new_with_seed(&config, 0).unwrap();
        let summary = sim.start_summary();

        assert_eq!(summary.wolf, Position::ORIGIN);
        assert_eq!(summary.max_rounds, 50);
        assert_eq!(summary.sheep_count, 15);
    }
}
