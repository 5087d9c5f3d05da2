// src/models.rs

use crate::constants::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// --- Difficulty ---

/// Difficulty tier, always within `LEVEL_MIN..=LEVEL_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    pub const BABY: DifficultyLevel = DifficultyLevel(0);
    pub const EASY: DifficultyLevel = DifficultyLevel(1);
    pub const MEDIUM: DifficultyLevel = DifficultyLevel(2);
    pub const HARD: DifficultyLevel = DifficultyLevel(3);
    pub const MASTER: DifficultyLevel = DifficultyLevel(4);

    /// Builds a level from any integer, clamping into the valid range.
    pub fn clamped(raw: i64) -> Self {
        DifficultyLevel(raw.clamp(LEVEL_MIN as i64, LEVEL_MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        LEVEL_NAMES[self.0 as usize]
    }

    /// Inclusive (min, max) operand range for this level.
    pub fn range(self) -> (i64, i64) {
        LEVEL_RANGES[self.0 as usize]
    }

    pub fn is_max(self) -> bool {
        self.0 >= LEVEL_MAX
    }

    pub fn is_min(self) -> bool {
        self.0 <= LEVEL_MIN
    }

    /// Next level up, saturating at Master.
    pub fn raised(self) -> Self {
        Self::clamped(self.0 as i64 + 1)
    }

    /// Next level down, saturating at Baby.
    pub fn lowered(self) -> Self {
        Self::clamped(self.0 as i64 - 1)
    }

    pub fn all() -> impl Iterator<Item = DifficultyLevel> {
        (LEVEL_MIN..=LEVEL_MAX).map(DifficultyLevel)
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel(LEVEL_INITIAL)
    }
}

impl From<i64> for DifficultyLevel {
    fn from(raw: i64) -> Self {
        DifficultyLevel::clamped(raw)
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.0
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Operators ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
        }
    }

    pub fn apply(&self, a: i64, b: i64) -> i64 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
        }
    }
}

impl FromStr for Operator {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            other => Err(format!("unknown operator '{}'", other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// --- Puzzle ---

/// A single generated problem. The answer is always the exact result of
/// applying the operator to the stored operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    operand_a: i64,
    operand_b: i64,
    operator: Operator,
    correct_answer: i64,
    level: DifficultyLevel,
}

impl Puzzle {
    /// Subtraction operands are ordered so the result is never negative.
    pub fn new(a: i64, b: i64, operator: Operator, level: DifficultyLevel) -> Self {
        let (operand_a, operand_b) = if operator == Operator::Sub && a < b {
            (b, a)
        } else {
            (a, b)
        };
        Puzzle {
            operand_a,
            operand_b,
            operator,
            correct_answer: operator.apply(operand_a, operand_b),
            level,
        }
    }

    pub fn operand_a(&self) -> i64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> i64 {
        self.operand_b
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn correct_answer(&self) -> i64 {
        self.correct_answer
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    pub fn question(&self) -> String {
        format!("{} {} {}", self.operand_a, self.operator, self.operand_b)
    }
}

// --- Attempt Log ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: i64,
    pub correct: bool,
    pub time_taken: f64, // Seconds
    pub level: DifficultyLevel,
    pub operation: Operator,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

// --- Derived Views ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub total_questions: usize,
    pub total_correct: usize,
    pub overall_accuracy: f64,
    pub average_time: f64,
}

/// Accuracy per (level, operator); pairs never attempted are absent.
pub type MasteryHeatmap = BTreeMap<DifficultyLevel, BTreeMap<Operator, f64>>;

// --- Engine State ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineState {
    pub level: DifficultyLevel,
    pub correct_streak: u32,
    pub wrong_streak: u32,
}

impl Default for EngineState {
    fn default() -> Self {
        EngineState {
            level: DifficultyLevel::default(),
            correct_streak: 0,
            wrong_streak: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelChange {
    Promoted,
    Demoted,
    Unchanged,
}

// --- Ranks ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rank {
    Novice,
    Apprentice,
    Calculator,
    MathWizard,
    Grandmaster,
}

impl Rank {
    pub fn from_xp(xp: u64) -> Self {
        match xp {
            x if x < RANK_NOVICE_MAX => Rank::Novice,
            x if x < RANK_APPRENTICE_MAX => Rank::Apprentice,
            x if x < RANK_CALCULATOR_MAX => Rank::Calculator,
            x if x < RANK_WIZARD_MAX => Rank::MathWizard,
            _ => Rank::Grandmaster,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Novice => "Novice",
            Rank::Apprentice => "Apprentice",
            Rank::Calculator => "Calculator",
            Rank::MathWizard => "Math Wizard",
            Rank::Grandmaster => "Grandmaster",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
