use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

pub trait ScoreStore {
    fn load(&self) -> Option<u64>;
    fn save(&mut self, best_secs: u64) -> Result<()>;
}

/// Best time over all sessions. An empty book means "no record yet",
/// never zero.
pub struct RecordBook {
    best: Option<u64>,
    store: Box<dyn ScoreStore>,
}

impl RecordBook {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let best = store.load();
        Self { best, store }
    }

    pub fn best(&self) -> Option<u64> {
        self.best
    }

    /// Records `elapsed_secs` if it beats the current best (strictly).
    /// Returns whether it was a new record. A store failure keeps the
    /// in-process best for this run and is only logged.
    pub fn submit(&mut self, elapsed_secs: u64) -> bool {
        let record = self.best.map_or(true, |best| elapsed_secs < best);
        if record {
            self.best = Some(elapsed_secs);
            if let Err(err) = self.store.save(elapsed_secs) {
                warn!("failed to persist best time: {err:#}");
            }
        }
        record
    }
}

#[derive(Serialize, Deserialize)]
struct ScoreFile {
    best_seconds: u64,
}

pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("RAT_ESCAPE_SCORE_FILE") {
            return PathBuf::from(path);
        }
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".rat_escape_score.json"),
            Err(_) => PathBuf::from("rat_escape_score.json"),
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Option<u64> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    warn!("failed to read score file {}: {}", self.path.display(), err);
                }
                return None;
            }
        };
        match serde_json::from_str::<ScoreFile>(&content) {
            Ok(score) => Some(score.best_seconds),
            Err(err) => {
                warn!(
                    "ignoring malformed score file {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    fn save(&mut self, best_secs: u64) -> Result<()> {
        let body = serde_json::to_string(&ScoreFile {
            best_seconds: best_secs,
        })?;
        fs::write(&self.path, body)
            .with_context(|| format!("writing score file {}", self.path.display()))
    }
}

#[cfg(test)]
pub(crate) struct MemoryScoreStore {
    best: Option<u64>,
}

#[cfg(test)]
impl MemoryScoreStore {
    pub(crate) fn new(best: Option<u64>) -> Self {
        Self { best }
    }
}

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<u64> {
        self.best
    }

    fn save(&mut self, best_secs: u64) -> Result<()> {
        self.best = Some(best_secs);
        Ok(())
    }
}
