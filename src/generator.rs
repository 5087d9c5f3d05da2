// src/generator.rs

use crate::models::{DifficultyLevel, Operator, Puzzle};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draws a random puzzle for `level`. Out-of-range levels are clamped.
///
/// Multiplication operands come from the lower half of the level's range
/// so products stay readable at the higher tiers.
pub fn generate_puzzle<R: Rng>(level: i64, rng: &mut R) -> Puzzle {
    let lvl = DifficultyLevel::clamped(level);
    if lvl.value() as i64 != level {
        warn!("[Generator] Level {} out of range, clamped to {}", level, lvl.value());
    }

    let operator = *Operator::ALL.choose(rng).unwrap_or(&Operator::Add);
    let (min_val, max_val) = operand_bounds(lvl, operator);

    let a = rng.gen_range(min_val..=max_val);
    let b = rng.gen_range(min_val..=max_val);
    let puzzle = Puzzle::new(a, b, operator, lvl);

    debug!(
        "[Generator] {} = {} ({})",
        puzzle.question(),
        puzzle.correct_answer(),
        lvl
    );
    puzzle
}

/// Inclusive operand bounds for an operator at a given level.
pub fn operand_bounds(level: DifficultyLevel, operator: Operator) -> (i64, i64) {
    let (min_val, max_val) = level.range();
    match operator {
        Operator::Mul => (min_val, (max_val / 2).max(min_val)),
        Operator::Add | Operator::Sub => (min_val, max_val),
    }
}
