use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use md_gen::{Operator, Problem};

/// One graded batch in the practice history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeRecord {
    /// Creation time in epoch milliseconds
    pub id: String,
    /// When the batch was graded
    pub timestamp: DateTime<Utc>,
    /// Correct answers
    pub score: usize,
    /// Problems in the batch
    pub total: usize,
    /// Percentage of correct answers (0 to 100)
    pub accuracy: f64,
}

impl PracticeRecord {
    /// Build a record for a batch graded at `at`.
    pub fn new(score: usize, total: usize, at: DateTime<Utc>) -> Self {
        Self {
            id: at.timestamp_millis().to_string(),
            timestamp: at,
            score,
            total,
            accuracy: accuracy(score, total),
        }
    }
}

/// Percentage of correct answers; an empty batch scores 0.
pub fn accuracy(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score as f64 / total as f64 * 100.0
}
