//! Practice flow for the arithmetic drills: the daily quota, the session
//! state machine and the ambient pieces (config, logging, metrics) a front
//! end needs to host them.

pub mod book;
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod metrics;
pub mod quota;
pub mod session;
pub mod tracing;
pub mod validation;

pub use book::{GradeCommit, PracticeBook, PracticeLimits};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DrillConfig, Environment};
pub use error::DrillError;
pub use quota::QuotaSummary;
pub use session::{EliminationOutcome, ExitReason, GradeReport, Phase, PracticeMode, Session};
