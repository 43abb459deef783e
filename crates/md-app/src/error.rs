use thiserror::Error;

use crate::session::ExitReason;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrillError {
    #[error("Invalid answer: {0}")]
    Validation(String),
    #[error("{unanswered} problem(s) still need an answer")]
    Incomplete { unanswered: usize },
    #[error("Invalid selection: {0}")]
    Selection(String),
    #[error("Unknown problem: {0}")]
    UnknownProblem(String),
    #[error("Not allowed right now: {0}")]
    InvalidState(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error(transparent)]
    Exit(#[from] ExitReason),
}
