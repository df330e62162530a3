use std::fs;
use std::path::PathBuf;

use log::{info, warn};

const HIGH_SCORE_FILE: &str = ".gridsnake_high_score";

/// The one persisted record: the high score, stored as plain text.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new() -> Self {
        Self::at(PathBuf::from(HIGH_SCORE_FILE))
    }

    pub fn at(path: PathBuf) -> Self {
        HighScoreStore { path }
    }

    /// Missing or unreadable records default to zero, never an error.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.trim().parse().unwrap_or_else(|_| {
                warn!("high score file {:?} is not a number, starting from 0", self.path);
                0
            }),
            Err(_) => 0,
        }
    }

    pub fn save(&self, score: u32) {
        match fs::write(&self.path, score.to_string()) {
            Ok(()) => info!("persisted new high score: {}", score),
            Err(e) => warn!("could not persist high score: {}", e),
        }
    }
}
