// src/pedagogy.rs

use crate::constants::*;
use crate::engine::AdaptiveEngine;
use crate::generator;
use crate::models::{DifficultyLevel, LevelChange, Puzzle, Rank};
use crate::tracker::{self, PerformanceTracker};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Result of judging one answer, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: i64,
    pub xp_earned: u64,
    pub old_level: DifficultyLevel,
    pub new_level: DifficultyLevel,
    pub change: LevelChange,
}

/// One learner's session: tracker, engine, experience and the random
/// source. Each learner gets their own instance.
#[derive(Debug, Clone)]
pub struct Session {
    player: String,
    tracker: PerformanceTracker,
    engine: AdaptiveEngine,
    xp: u64,
    pending: Option<Puzzle>,
    rng: ChaCha8Rng,
}

impl Session {
    pub fn new(player: &str) -> Self {
        Self::with_rng(player, ChaCha8Rng::from_entropy())
    }

    /// Reproducible session (for testing and `--seed`).
    pub fn with_seed(player: &str, seed: u64) -> Self {
        Self::with_rng(player, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(player: &str, rng: ChaCha8Rng) -> Self {
        info!("Starting session for '{}'", player);
        Session {
            player: player.trim().to_string(),
            tracker: PerformanceTracker::new(),
            engine: AdaptiveEngine::new(),
            xp: 0,
            pending: None,
            rng,
        }
    }

    // --- Public Interface ---

    /// Returns the unanswered puzzle, generating one at the engine's
    /// current level if none is pending.
    pub fn next_puzzle(&mut self) -> &Puzzle {
        let level = self.engine.level();
        let rng = &mut self.rng;
        self.pending.get_or_insert_with(|| {
            debug!("Requesting puzzle at level {}", level.name());
            generator::generate_puzzle(level.value() as i64, rng)
        })
    }

    pub fn pending_puzzle(&self) -> Option<&Puzzle> {
        self.pending.as_ref()
    }

    /// Judges `answer` against the pending puzzle and advances the
    /// session. Returns `None` when no puzzle is pending.
    pub fn submit_answer(&mut self, answer: &str, elapsed_seconds: f64) -> Option<AnswerFeedback> {
        let puzzle = self.pending.take()?;
        let level = puzzle.level();
        let elapsed_seconds = tracker::normalize_time(elapsed_seconds);

        let correct = self.tracker.log(
            &puzzle.question(),
            answer,
            puzzle.correct_answer(),
            elapsed_seconds,
            level,
            puzzle.operator(),
        );

        let change = self.engine.update(correct, self.tracker.accuracy());
        let xp_earned = calculate_xp(level, elapsed_seconds, correct);
        self.xp = self.xp.saturating_add(xp_earned);

        info!(
            "[Session] {} answered {} ({}), +{} XP, total {}",
            self.player,
            puzzle.question(),
            if correct { "correct" } else { "wrong" },
            xp_earned,
            self.xp
        );

        Some(AnswerFeedback {
            correct,
            correct_answer: puzzle.correct_answer(),
            xp_earned,
            old_level: level,
            new_level: self.engine.level(),
            change,
        })
    }

    /// Starts over with a fresh tracker, engine and XP; keeps the player
    /// name and the random stream.
    pub fn reset(&mut self) {
        info!("Resetting session for '{}'", self.player);
        self.tracker = PerformanceTracker::new();
        self.engine = AdaptiveEngine::new();
        self.xp = 0;
        self.pending = None;
    }

    // --- Accessors ---

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn tracker(&self) -> &PerformanceTracker {
        &self.tracker
    }

    pub fn engine(&self) -> &AdaptiveEngine {
        &self.engine
    }

    pub fn level(&self) -> DifficultyLevel {
        self.engine.level()
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn rank(&self) -> Rank {
        Rank::from_xp(self.xp)
    }
}

/// Experience for one answer: a per-level base plus a bonus for
/// answering within `XP_BONUS_TIME_LIMIT` seconds.
pub fn calculate_xp(level: DifficultyLevel, time_taken: f64, correct: bool) -> u64 {
    if !correct {
        return 0;
    }
    let base_points = XP_BASE_PER_LEVEL * (level.value() as f64 + 1.0);
    let time_bonus = ((XP_BONUS_TIME_LIMIT - time_taken) * XP_BONUS_PER_SECOND).max(0.0);
    (base_points + time_bonus) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_rewards_level_and_speed() {
        assert_eq!(calculate_xp(DifficultyLevel::BABY, 2.0, false), 0);
        assert_eq!(calculate_xp(DifficultyLevel::BABY, 20.0, true), 10);
        assert_eq!(calculate_xp(DifficultyLevel::EASY, 4.0, true), 32);
        assert_eq!(calculate_xp(DifficultyLevel::MASTER, 9.75, true), 50);
    }

    #[test]
    fn invalid_elapsed_time_pays_zero_second_xp() {
        let mut session = Session::with_seed("Ada", 4);
        for elapsed in [-100.0, f64::NEG_INFINITY, f64::NAN] {
            session.reset();
            let answer = session.next_puzzle().correct_answer().to_string();
            let feedback = session.submit_answer(&answer, elapsed).unwrap();
            assert!(feedback.correct);
            // Easy base 20 plus the full 20 point speed bonus
            assert_eq!(feedback.xp_earned, 40);
            assert_eq!(session.xp(), 40);
            assert_eq!(session.tracker().history()[0].time_taken, 0.0);
        }

        let answer = session.next_puzzle().correct_answer().to_string();
        session.submit_answer(&answer, f64::NEG_INFINITY);
        assert_eq!(session.xp(), 80);
    }

    #[test]
    fn pending_puzzle_is_stable_until_answered() {
        let mut session = Session::with_seed("Ada", 3);
        let first = session.next_puzzle().clone();
        assert_eq!(session.next_puzzle(), &first);
        assert_eq!(first.level(), DifficultyLevel::EASY);

        let feedback = session.submit_answer("not a number", 1.0).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, first.correct_answer());
        assert!(session.pending_puzzle().is_none());
        assert!(session.submit_answer("1", 1.0).is_none());
    }

    #[test]
    fn correct_answers_earn_xp_and_promote() {
        let mut session = Session::with_seed("Ada", 11);
        let mut changes = Vec::new();
        for _ in 0..3 {
            let answer = session.next_puzzle().correct_answer().to_string();
            let feedback = session.submit_answer(&answer, 1.0).unwrap();
            assert!(feedback.correct);
            changes.push(feedback.change);
        }
        assert_eq!(changes.last(), Some(&LevelChange::Promoted));
        assert_eq!(session.level(), DifficultyLevel::MEDIUM);
        // Three Easy answers at 1s: 20 + 18 each
        assert_eq!(session.xp(), 114);
        assert_eq!(session.rank(), Rank::Apprentice);
        assert_eq!(session.next_puzzle().level(), DifficultyLevel::MEDIUM);
    }

    #[test]
    fn reset_clears_progress() {
        let mut session = Session::with_seed("Ada", 5);
        let answer = session.next_puzzle().correct_answer().to_string();
        session.submit_answer(&answer, 1.0);
        session.reset();
        assert_eq!(session.xp(), 0);
        assert!(session.tracker().is_empty());
        assert_eq!(session.level(), DifficultyLevel::EASY);
        assert_eq!(session.player(), "Ada");
    }
}
