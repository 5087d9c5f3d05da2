// src/tracker.rs

use crate::constants::*;
use crate::models::{Attempt, DifficultyLevel, MasteryHeatmap, Operator, SessionSummary};
use chrono::Utc;
use log::{debug, warn};
use std::collections::{BTreeMap, VecDeque};

/// Append-only log of every attempt in a session plus the statistics
/// derived from it.
#[derive(Debug, Clone)]
pub struct PerformanceTracker {
    history: Vec<Attempt>,
    recent: VecDeque<bool>,
    recent_window: usize,
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::with_window(RECENT_WINDOW)
    }

    pub fn with_window(recent_window: usize) -> Self {
        let recent_window = recent_window.max(1);
        PerformanceTracker {
            history: Vec::new(),
            recent: VecDeque::with_capacity(recent_window),
            recent_window,
        }
    }

    // --- Logging ---

    /// Judges and records an attempt with the default confidence weight.
    pub fn log(
        &mut self,
        question: &str,
        user_answer: &str,
        correct_answer: i64,
        time_taken: f64,
        level: DifficultyLevel,
        operation: Operator,
    ) -> bool {
        self.log_with_confidence(
            question,
            user_answer,
            correct_answer,
            time_taken,
            level,
            operation,
            DEFAULT_CONFIDENCE,
        )
    }

    /// Judges and records an attempt. The answer is correct only when its
    /// trimmed text equals the canonical rendering of `correct_answer`, so
    /// "7.0" or "seven" never match 7.
    #[allow(clippy::too_many_arguments)]
    pub fn log_with_confidence(
        &mut self,
        question: &str,
        user_answer: &str,
        correct_answer: i64,
        time_taken: f64,
        level: DifficultyLevel,
        operation: Operator,
        confidence: f64,
    ) -> bool {
        let correct = user_answer.trim() == correct_answer.to_string();

        let time_taken = normalize_time(time_taken);

        self.history.push(Attempt {
            question: question.to_string(),
            user_answer: user_answer.to_string(),
            correct_answer,
            correct,
            time_taken,
            level,
            operation,
            confidence: normalize_confidence(confidence),
            timestamp: Utc::now(),
        });

        if self.recent.len() == self.recent_window {
            self.recent.pop_front();
        }
        self.recent.push_back(correct);

        debug!(
            "[Tracker] #{} '{}' answered '{}' -> {} ({:.2}s)",
            self.history.len(),
            question,
            user_answer.trim(),
            if correct { "correct" } else { "wrong" },
            time_taken
        );
        correct
    }

    // --- Queries ---

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Confidence-weighted accuracy over the whole history, or the neutral
    /// prior when nothing has been logged yet.
    pub fn accuracy(&self) -> f64 {
        let (weighted_correct, total_confidence) =
            self.history.iter().fold((0.0, 0.0), |(c, t), h| {
                let hit = if h.correct { h.confidence } else { 0.0 };
                (c + hit, t + h.confidence)
            });

        if total_confidence > 0.0 {
            weighted_correct / total_confidence
        } else {
            NEUTRAL_ACCURACY
        }
    }

    /// Unweighted accuracy over the last `n` attempts.
    pub fn recent_accuracy(&self, n: usize) -> f64 {
        let start = self.history.len().saturating_sub(n);
        let recent = &self.history[start..];
        if recent.is_empty() {
            return NEUTRAL_ACCURACY;
        }
        recent.iter().filter(|h| h.correct).count() as f64 / recent.len() as f64
    }

    /// Accuracy over the bounded rolling window of outcomes.
    pub fn rolling_accuracy(&self) -> f64 {
        if self.recent.is_empty() {
            return NEUTRAL_ACCURACY;
        }
        self.recent.iter().filter(|&&c| c).count() as f64 / self.recent.len() as f64
    }

    /// Trailing run of correct answers.
    pub fn current_streak(&self) -> usize {
        self.history.iter().rev().take_while(|h| h.correct).count()
    }

    pub fn last_level(&self) -> Option<DifficultyLevel> {
        self.history.last().map(|h| h.level)
    }

    pub fn summary(&self) -> SessionSummary {
        let total = self.history.len();
        let correct = self.history.iter().filter(|h| h.correct).count();
        let (overall_accuracy, average_time) = if total > 0 {
            let time_sum: f64 = self.history.iter().map(|h| h.time_taken).sum();
            (correct as f64 / total as f64, time_sum / total as f64)
        } else {
            (0.0, 0.0)
        };

        SessionSummary {
            total_questions: total,
            total_correct: correct,
            overall_accuracy,
            average_time,
        }
    }

    pub fn mastery_heatmap(&self) -> MasteryHeatmap {
        let mut counts: BTreeMap<DifficultyLevel, BTreeMap<Operator, (usize, usize)>> =
            BTreeMap::new();
        for h in &self.history {
            let entry = counts
                .entry(h.level)
                .or_default()
                .entry(h.operation)
                .or_insert((0, 0));
            entry.1 += 1;
            if h.correct {
                entry.0 += 1;
            }
        }

        counts
            .into_iter()
            .map(|(lvl, ops)| {
                let ops = ops
                    .into_iter()
                    .map(|(op, (correct, total))| (op, correct as f64 / total as f64))
                    .collect();
                (lvl, ops)
            })
            .collect()
    }
}

/// Elapsed seconds as stored: negative or non-finite values become 0.
pub fn normalize_time(time_taken: f64) -> f64 {
    if time_taken.is_finite() && time_taken >= 0.0 {
        time_taken
    } else {
        warn!("[Tracker] Invalid time {} replaced with 0", time_taken);
        0.0
    }
}

fn normalize_confidence(confidence: f64) -> f64 {
    if !confidence.is_finite() || confidence <= 0.0 {
        warn!(
            "[Tracker] Confidence {} invalid, using {}",
            confidence, DEFAULT_CONFIDENCE
        );
        DEFAULT_CONFIDENCE
    } else {
        confidence.min(1.0)
    }
}
