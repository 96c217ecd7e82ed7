//! Per-round run artifacts: position snapshots (JSON) and alive counts (CSV).
//!
//! Both files are rewritten in full after every round so that an
//! interrupted run leaves a complete record of the rounds played so far.

use crate::world::Simulation;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Positions of every agent at the end of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round_no: u32,
    pub wolf_pos: (f64, f64),
    /// One entry per population slot, `None` for eaten sheep
    pub sheep_pos: Vec<Option<(f64, f64)>>,
}

impl RoundSnapshot {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            round_no: sim.round(),
            wolf_pos: sim.wolf().position.as_pair(),
            sheep_pos: sim
                .population()
                .positions()
                .into_iter()
                .map(|pos| pos.map(|p| p.as_pair()))
                .collect(),
        }
    }
}

/// Alive sheep count at the end of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliveRecord {
    pub round_no: u32,
    pub alive_sheep: usize,
}

impl AliveRecord {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            round_no: sim.round(),
            alive_sheep: sim.live_count(),
        }
    }

    pub fn csv_header() -> &'static str {
        "Round_no,Alive_sheep"
    }

    pub fn to_csv_row(&self) -> String {
        format!("{},{}", self.round_no, self.alive_sheep)
    }
}

/// Cumulative recorder for a run's artifacts
pub struct RunRecorder {
    pub positions: Vec<RoundSnapshot>,
    pub alive: Vec<AliveRecord>,
    positions_path: PathBuf,
    alive_path: PathBuf,
}

impl RunRecorder {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(positions_path: P, alive_path: Q) -> Self {
        Self {
            positions: Vec::new(),
            alive: Vec::new(),
            positions_path: positions_path.into(),
            alive_path: alive_path.into(),
        }
    }

    /// Recorder writing the given file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P, positions_file: &Path, alive_file: &Path) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(positions_file), dir.join(alive_file))
    }

    pub fn positions_path(&self) -> &Path {
        &self.positions_path
    }

    pub fn alive_path(&self) -> &Path {
        &self.alive_path
    }

    /// Append the current round and rewrite both files.
    ///
    /// Write failures are logged and otherwise ignored so that a full disk
    /// never stops a run in progress.
    pub fn record(&mut self, sim: &Simulation) {
        self.alive.push(AliveRecord::capture(sim));
        self.positions.push(RoundSnapshot::capture(sim));

        match self.save_alive() {
            Ok(()) => log::debug!(
                "Information about alive sheep saved to {} file.",
                self.alive_path.display()
            ),
            Err(e) => log::error!(
                "Failed saving info about alive sheep to {} file: {}",
                self.alive_path.display(),
                e
            ),
        }

        match self.save_positions() {
            Ok(()) => log::debug!(
                "Information about positions saved to {} file.",
                self.positions_path.display()
            ),
            Err(e) => log::error!(
                "Failed saving info about positions to {} file: {}",
                self.positions_path.display(),
                e
            ),
        }
    }

    /// Write every recorded snapshot as a pretty-printed JSON array
    pub fn save_positions(&self) -> Result<(), SnapshotError> {
        let file = File::create(&self.positions_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.positions)?;
        writer.flush()?;
        Ok(())
    }

    /// Write every recorded alive count as CSV
    pub fn save_alive(&self) -> Result<(), SnapshotError> {
        let file = File::create(&self.alive_path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", AliveRecord::csv_header())?;
        for record in &self.alive {
            writeln!(writer, "{}", record.to_csv_row())?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur while writing run artifacts
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::population::Population;
    use crate::wolf::Wolf;

    fn two_sheep_sim() -> Simulation {
        let population = Population::from_positions(
            &[Position::new(0.5, 0.0), Position::new(8.0, 8.0)],
            0.25,
        );
        Simulation::from_parts(5, population, Wolf::new(1.0), 11).unwrap()
    }

    #[test]
    fn test_snapshot_marks_eaten_sheep() {
        let mut sim = two_sheep_sim();
        sim.run_round();

        let snapshot = RoundSnapshot::capture(&sim);
        assert_eq!(snapshot.round_no, 1);
        assert_eq!(snapshot.sheep_pos.len(), 2);
        assert_eq!(snapshot.sheep_pos[0], None);
        assert!(snapshot.sheep_pos[1].is_some());

        let wolf = sim.wolf().position;
        assert_eq!(snapshot.wolf_pos, (wolf.x, wolf.y));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = RoundSnapshot {
            round_no: 2,
            wolf_pos: (1.0, -1.0),
            sheep_pos: vec![Some((0.5, 0.5)), None],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "round_no": 2,
                "wolf_pos": [1.0, -1.0],
                "sheep_pos": [[0.5, 0.5], null]
            })
        );
    }

    #[test]
    fn test_recorder_writes_cumulative_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder =
            RunRecorder::in_dir(dir.path(), Path::new("pos.json"), Path::new("alive.csv"));
        let mut sim = two_sheep_sim();

        for _ in 0..3 {
            sim.run_round();
            recorder.record(&sim);
        }

        let csv = std::fs::read_to_string(recorder.alive_path()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Round_no,Alive_sheep");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1,1");

        let json = std::fs::read_to_string(recorder.positions_path()).unwrap();
        let loaded: Vec<RoundSnapshot> = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.len(), recorder.positions.len());
        for (read, kept) in loaded.iter().zip(&recorder.positions) {
            assert!((read.wolf_pos.0 - kept.wolf_pos.0).abs() < 1e-12);
            assert!((read.wolf_pos.1 - kept.wolf_pos.1).abs() < 1e-12);
            assert_eq!(read.sheep_pos[0], None);
            assert!(read.sheep_pos[1].is_some());
        }
        assert_eq!(loaded.iter().map(|s| s.round_no).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_dir");
        let mut recorder = RunRecorder::new(missing.join("pos.json"), missing.join("alive.csv"));
        let mut sim = two_sheep_sim();

        sim.run_round();
        recorder.record(&sim);

        assert_eq!(recorder.positions.len(), 1);
        assert_eq!(recorder.alive.len(), 1);
        assert!(matches!(recorder.save_positions(), Err(SnapshotError::Io(_))));
        assert!(sim.should_continue());
    }
}
