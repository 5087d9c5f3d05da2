// src/constants.rs

// --- Difficulty Levels ---
pub const LEVEL_MIN: u8 = 0;
pub const LEVEL_MAX: u8 = 4;
pub const LEVEL_INITIAL: u8 = 1; // Easy

pub const LEVEL_NAMES: [&str; 5] = ["Baby", "Easy", "Medium", "Hard", "Master"];

// (min operand, max operand), indexed by level
pub const LEVEL_RANGES: [(i64, i64); 5] = [(1, 10), (5, 25), (10, 50), (20, 100), (50, 200)];

// --- Adaptive Rules ---
pub const PROMOTION_STREAK: u32 = 3;
pub const PROMOTION_ACCURACY: f64 = 0.7;
pub const DEMOTION_STREAK: u32 = 2;
pub const DEMOTION_ACCURACY: f64 = 0.4;

// --- Tracker ---
pub const NEUTRAL_ACCURACY: f64 = 0.5; // Prior used before any attempt exists
pub const DEFAULT_CONFIDENCE: f64 = 1.0;
pub const RECENT_WINDOW: usize = 10;
pub const LAST_N_DEFAULT: usize = 5;

// --- Experience ---
pub const XP_BASE_PER_LEVEL: f64 = 10.0;
pub const XP_BONUS_TIME_LIMIT: f64 = 10.0; // Seconds
pub const XP_BONUS_PER_SECOND: f64 = 2.0;

// Upper XP bound (exclusive) for each rank below Grandmaster
pub const RANK_NOVICE_MAX: u64 = 100;
pub const RANK_APPRENTICE_MAX: u64 = 300;
pub const RANK_CALCULATOR_MAX: u64 = 600;
pub const RANK_WIZARD_MAX: u64 = 1000;
