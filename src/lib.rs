// src/lib.rs

//! Adaptive arithmetic practice: a puzzle generator, a performance
//! tracker and a threshold-based difficulty engine, tied together by an
//! explicit [`pedagogy::Session`] and driven from the terminal by [`cli`].

pub mod cli;
pub mod constants;
pub mod engine;
pub mod error;
pub mod generator;
pub mod models;
pub mod pedagogy;
pub mod report;
pub mod tracker;

pub use engine::AdaptiveEngine;
pub use generator::generate_puzzle;
pub use models::{DifficultyLevel, Operator, Puzzle};
pub use pedagogy::Session;
pub use tracker::PerformanceTracker;
