// src/engine.rs

use crate::constants::*;
use crate::models::{DifficultyLevel, EngineState, LevelChange};
use log::{debug, info};

/// Threshold state machine that moves the learner between levels.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveEngine {
    state: EngineState,
}

impl AdaptiveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: EngineState) -> Self {
        AdaptiveEngine { state }
    }

    pub fn level(&self) -> DifficultyLevel {
        self.state.level
    }

    pub fn correct_streak(&self) -> u32 {
        self.state.correct_streak
    }

    pub fn wrong_streak(&self) -> u32 {
        self.state.wrong_streak
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Feeds one judged attempt and the tracker's current accuracy.
    /// Promotion is checked first; a single call never both promotes and
    /// demotes.
    pub fn update(&mut self, was_correct: bool, accuracy: f64) -> LevelChange {
        let state = &mut self.state;
        let old_level = state.level;

        if was_correct {
            state.correct_streak += 1;
            state.wrong_streak = 0;
        } else {
            state.correct_streak = 0;
            state.wrong_streak += 1;
        }

        debug!(
            "[Engine Input] Correct: {}, Accuracy: {:.2}, Streaks: +{} / -{}",
            was_correct, accuracy, state.correct_streak, state.wrong_streak
        );

        let change = if state.correct_streak >= PROMOTION_STREAK
            && accuracy >= PROMOTION_ACCURACY
            && !state.level.is_max()
        {
            debug!("[Engine] Branch: Promote");
            state.level = state.level.raised();
            state.correct_streak = 0;
            LevelChange::Promoted
        } else if state.wrong_streak >= DEMOTION_STREAK || accuracy <= DEMOTION_ACCURACY {
            // The wrong streak resets even when already at the floor.
            debug!("[Engine] Branch: Demote");
            let change = if state.level.is_min() {
                LevelChange::Unchanged
            } else {
                state.level = state.level.lowered();
                LevelChange::Demoted
            };
            state.wrong_streak = 0;
            change
        } else {
            LevelChange::Unchanged
        };

        if change != LevelChange::Unchanged {
            info!(
                "[Engine Result] Level {} -> {}",
                old_level.name(),
                state.level.name()
            );
        }
        change
    }
}
