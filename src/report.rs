// src/report.rs

use crate::models::{DifficultyLevel, MasteryHeatmap, Rank, SessionSummary};
use crate::pedagogy::Session;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptStatus {
    Correct,
    Wrong,
}

/// One point of the reaction-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub question_number: usize,
    pub question: String,
    pub time_taken: f64,
    pub status: AttemptStatus,
    pub level: DifficultyLevel,
}

/// One bar of the accuracy-by-difficulty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelAccuracy {
    pub level: DifficultyLevel,
    pub name: &'static str,
    pub accuracy: f64,
}

/// Post-session analytics, built fresh from the attempt history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionReport {
    pub player: String,
    pub summary: SessionSummary,
    pub xp: u64,
    pub rank: Rank,
    pub timeline: Vec<TimelinePoint>,
    pub level_accuracy: Vec<LevelAccuracy>,
    pub mastery: MasteryHeatmap,
}

impl MissionReport {
    pub fn from_session(session: &Session) -> Self {
        let tracker = session.tracker();
        let mastery = tracker.mastery_heatmap();

        let timeline = tracker
            .history()
            .iter()
            .enumerate()
            .map(|(i, h)| TimelinePoint {
                question_number: i + 1,
                question: h.question.clone(),
                time_taken: h.time_taken,
                status: if h.correct {
                    AttemptStatus::Correct
                } else {
                    AttemptStatus::Wrong
                },
                level: h.level,
            })
            .collect();

        MissionReport {
            player: session.player().to_string(),
            summary: tracker.summary(),
            xp: session.xp(),
            rank: session.rank(),
            timeline,
            level_accuracy: level_accuracy(&mastery),
            mastery,
        }
    }

    pub fn has_data(&self) -> bool {
        self.summary.total_questions > 0
    }
}

/// Mean of the operator accuracies recorded for each level.
pub fn level_accuracy(mastery: &MasteryHeatmap) -> Vec<LevelAccuracy> {
    mastery
        .iter()
        .map(|(&level, ops)| {
            let accuracy = if ops.is_empty() {
                0.0
            } else {
                ops.values().sum::<f64>() / ops.len() as f64
            };
            LevelAccuracy {
                level,
                name: level.name(),
                accuracy,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operator;
    use std::collections::BTreeMap;

    #[test]
    fn empty_session_has_no_data() {
        let session = Session::with_seed("Ada", 1);
        let report = MissionReport::from_session(&session);
        assert!(!report.has_data());
        assert!(report.timeline.is_empty());
        assert!(report.level_accuracy.is_empty());
        assert_eq!(report.rank, Rank::Novice);
    }

    #[test]
    fn level_accuracy_averages_operators() {
        let mut mastery = MasteryHeatmap::new();
        let mut ops = BTreeMap::new();
        ops.insert(Operator::Add, 1.0);
        ops.insert(Operator::Mul, 0.5);
        mastery.insert(DifficultyLevel::HARD, ops);
        mastery.insert(
            DifficultyLevel::BABY,
            BTreeMap::from([(Operator::Sub, 0.0)]),
        );

        let bars = level_accuracy(&mastery);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "Baby");
        assert_eq!(bars[0].accuracy, 0.0);
        assert_eq!(bars[1].name, "Hard");
        assert_eq!(bars[1].accuracy, 0.75);
    }

    #[test]
    fn timeline_numbers_from_one() {
        let mut session = Session::with_seed("Ada", 2);
        session.next_puzzle();
        session.submit_answer("nope", 4.0);
        let answer = session.next_puzzle().correct_answer().to_string();
        session.submit_answer(&answer, 2.0);

        let report = MissionReport::from_session(&session);
        assert!(report.has_data());
        assert_eq!(report.timeline[0].question_number, 1);
        assert_eq!(report.timeline[0].status, AttemptStatus::Wrong);
        assert_eq!(report.timeline[1].question_number, 2);
        assert_eq!(report.timeline[1].status, AttemptStatus::Correct);
        assert_eq!(report.summary.average_time, 3.0);
    }
}
