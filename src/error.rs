// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrainerError>;
