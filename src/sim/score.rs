//! Match state: score, level progress and the shot budget

use serde::{Deserialize, Serialize};

use crate::consts::FINAL_LEVEL;

/// Result of a projectile reaching the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The win for this level was already handled
    AlreadyProcessed,
    LevelWon { level: u32, score: u64, delta: u64 },
    /// Last level cleared; score is final
    GameCompleted { score: u64 },
}

/// Result of a fire request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Fired { remaining: u32 },
    /// No shots left; the level is lost
    OutOfShots,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub score: u64,
    /// Levels cleared so far (0-based index of the level in play)
    pub level: u32,
    pub remaining_shots: u32,
    pub max_shots: u32,
    /// Set once the target has been hit on this level
    pub win_processed: bool,
}

/// Points for clearing a level with shots to spare
pub fn score_delta(remaining_shots: u32, new_level: u32) -> u64 {
    ((remaining_shots as u64 * 10) + 10) * 10 * new_level as u64
}

impl MatchState {
    /// Enter a level with an existing score (new game, continue, or loaded profile)
    pub fn begin(level: u32, score: u64) -> Self {
        Self {
            score,
            level,
            ..Default::default()
        }
    }

    /// Reset the shot counters from a freshly loaded layout
    pub fn reset_shots(&mut self, max_shots: u32) {
        self.max_shots = max_shots;
        self.remaining_shots = max_shots;
    }

    pub fn on_target_hit(&mut self) -> TargetOutcome {
        if self.win_processed {
            return TargetOutcome::AlreadyProcessed;
        }
        self.win_processed = true;

        self.level += 1;
        if self.level >= FINAL_LEVEL {
            return TargetOutcome::GameCompleted { score: self.score };
        }

        let delta = score_delta(self.remaining_shots, self.level);
        self.score += delta;
        TargetOutcome::LevelWon {
            level: self.level,
            score: self.score,
            delta,
        }
    }

    pub fn on_shot_fired(&mut self) -> ShotOutcome {
        if self.remaining_shots == 0 {
            return ShotOutcome::OutOfShots;
        }
        self.remaining_shots -= 1;
        ShotOutcome::Fired {
            remaining: self.remaining_shots,
        }
    }
}
