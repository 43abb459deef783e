//! Practice session state machine.
//!
//! A [`Session`] drives one practice screen:
//!
//! ```text
//! start ──► Answering ──grade──► Checked ──new_batch──► Answering      (fresh)
//!                     └─grade──► EliminationOffered ──confirm──► Answering (review, perfect)
//!                                                    └─confirm──► exit     (review, set emptied)
//! ```
//!
//! Storage is never touched directly: every persistent effect goes through
//! the [`PracticeBook`] passed to the transition, so the machine stays free of
//! any UI framework and can be driven from tests. Conditions that should send
//! the learner elsewhere (no errors to review, quota exhausted) come back as an
//! [`ExitReason`]; the host decides where to navigate.

use md_gen::{Problem, generate_batch, grade_batch};
use md_store::KeyValueStore;
use thiserror::Error;

use crate::{
    book::PracticeBook,
    clock::Clock,
    error::DrillError,
    feedback::ResultTier,
    metrics,
    validation::parse_answer,
};

/// Number of errors removed after a perfect review batch.
pub const ELIMINATION_PICKS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeMode {
    /// Newly generated problems, limited by the daily quota
    Fresh,
    /// Problems drawn from the error set
    ErrorReview,
}

impl PracticeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::ErrorReview => "error_review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Answers may be edited
    Answering,
    /// Graded; answers are locked
    Checked,
    /// Graded perfectly in review mode; two errors may be picked for removal
    EliminationOffered,
}

/// Why a session cannot continue. The host should navigate away.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    #[error("There are no errors to practice")]
    NoErrorsToReview,
    #[error("The error collection is full, practice and eliminate errors first")]
    ErrorCapacityReached,
    #[error("Today's practice limit is reached, try the error collection instead")]
    DailyLimitReached,
    #[error("Every error has been eliminated")]
    ErrorsCleared,
}

impl ExitReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoErrorsToReview => "no_errors_to_review",
            Self::ErrorCapacityReached => "error_capacity_reached",
            Self::DailyLimitReached => "daily_limit_reached",
            Self::ErrorsCleared => "errors_cleared",
        }
    }
}

/// Result of grading the current batch.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub score: usize,
    pub total: usize,
    pub tier: ResultTier,
    pub errors_added: usize,
    pub elimination_offered: bool,
}

/// Result of confirming an elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationOutcome {
    /// A new review batch was loaded from the remaining errors.
    Reloaded { remaining: usize },
    /// The session is over.
    Exit(ExitReason),
}

#[derive(Debug, Clone)]
pub struct Session {
    mode: PracticeMode,
    phase: Phase,
    problems: Vec<Problem>,
    score: usize,
    selected: Vec<String>,
}

impl Session {
    /// Load the first batch for `mode`.
    ///
    /// Review mode needs a non-empty error set. Fresh mode must pass the quota
    /// gate.
    pub fn start<S, C>(book: &mut PracticeBook<S, C>, mode: PracticeMode) -> Result<Self, ExitReason>
    where
        S: KeyValueStore,
        C: Clock,
    {
        let problems = load_batch(book, mode)?;
        tracing::info!(mode = mode.as_str(), size = problems.len(), "practice session started");

        Ok(Self {
            mode,
            phase: Phase::Answering,
            problems,
            score: 0,
            selected: Vec::new(),
        })
    }

    pub const fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Score of the last grading, 0 while answering.
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Ids picked for elimination.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn all_answered(&self) -> bool {
        self.problems.iter().all(Problem::is_answered)
    }

    pub fn can_grade(&self) -> bool {
        self.phase == Phase::Answering && self.all_answered()
    }

    /// Record the learner's input for one problem.
    ///
    /// Blank input clears the answer. Rejected input leaves the session as it
    /// was.
    pub fn set_answer(&mut self, id: &str, input: &str) -> Result<(), DrillError> {
        self.require_phase(Phase::Answering, "answers are locked after grading")?;

        let answer = parse_answer(input).inspect_err(|_| metrics::record_rejected_answer())?;
        let problem = self
            .problems
            .iter_mut()
            .find(|problem| problem.id == id)
            .ok_or_else(|| DrillError::UnknownProblem(id.to_string()))?;

        problem.user_answer = answer;
        Ok(())
    }

    /// Grade the batch and persist the outcome.
    pub fn grade<S, C>(&mut self, book: &mut PracticeBook<S, C>) -> Result<GradeReport, DrillError>
    where
        S: KeyValueStore,
        C: Clock,
    {
        self.require_phase(Phase::Answering, "this batch has already been graded")?;

        let unanswered = self.problems.iter().filter(|p| !p.is_answered()).count();
        if unanswered > 0 {
            return Err(DrillError::Incomplete { unanswered });
        }

        let graded = grade_batch(&self.problems);
        let commit = book.commit_grading(self.mode, &graded);
        metrics::record_batch_graded(self.mode, graded.score, graded.total);

        let report = GradeReport {
            score: graded.score,
            total: graded.total,
            tier: ResultTier::from_score(graded.score, graded.total),
            errors_added: commit.errors_added,
            elimination_offered: commit.elimination_offered,
        };

        self.problems = graded.problems;
        self.score = graded.score;
        self.phase = if commit.elimination_offered {
            Phase::EliminationOffered
        } else {
            Phase::Checked
        };

        tracing::info!(
            mode = self.mode.as_str(),
            score = report.score,
            total = report.total,
            errors_added = report.errors_added,
            "batch graded"
        );
        Ok(report)
    }

    /// Pick or unpick a problem for elimination.
    ///
    /// At most two problems can be picked; picking a third is ignored.
    /// Returns whether `id` is picked afterwards.
    pub fn toggle_selection(&mut self, id: &str) -> Result<bool, DrillError> {
        self.require_phase(Phase::EliminationOffered, "elimination is not available")?;

        if !self.problems.iter().any(|problem| problem.id == id) {
            return Err(DrillError::UnknownProblem(id.to_string()));
        }

        if let Some(pos) = self.selected.iter().position(|picked| picked == id) {
            self.selected.remove(pos);
            return Ok(false);
        }

        if self.selected.len() < ELIMINATION_PICKS {
            self.selected.push(id.to_string());
            return Ok(true);
        }

        Ok(false)
    }

    /// Remove the two picked problems from the persisted error set.
    ///
    /// With errors left, a new review batch is loaded and answering starts
    /// over. Once the set is empty the session ends with
    /// [`ExitReason::ErrorsCleared`].
    pub fn confirm_elimination<S, C>(
        &mut self,
        book: &mut PracticeBook<S, C>,
    ) -> Result<EliminationOutcome, DrillError>
    where
        S: KeyValueStore,
        C: Clock,
    {
        self.require_phase(Phase::EliminationOffered, "elimination is not available")?;

        let [first, second] = self.selected.as_slice() else {
            return Err(DrillError::Selection(format!(
                "pick exactly {ELIMINATION_PICKS} problems to eliminate, {} picked",
                self.selected.len()
            )));
        };

        let remaining = book.eliminate(&[first.as_str(), second.as_str()]);
        self.selected.clear();

        if remaining == 0 {
            self.phase = Phase::Checked;
            metrics::record_session_exit(ExitReason::ErrorsCleared);
            return Ok(EliminationOutcome::Exit(ExitReason::ErrorsCleared));
        }

        let pool = book.error_problems();
        self.problems = generate_batch(book.limits().batch_size, Some(pool.as_slice()));
        self.reset_progress();

        Ok(EliminationOutcome::Reloaded { remaining })
    }

    /// Replace the batch with freshly generated problems.
    ///
    /// Only available in fresh mode. The quota gate runs again, so a learner
    /// who has used up the day's practice is sent away instead.
    pub fn new_batch<S, C>(&mut self, book: &mut PracticeBook<S, C>) -> Result<(), DrillError>
    where
        S: KeyValueStore,
        C: Clock,
    {
        if self.mode != PracticeMode::Fresh {
            return Err(DrillError::InvalidState(
                "new batches are only generated in fresh practice".to_string(),
            ));
        }

        self.problems = load_batch(book, self.mode)?;
        self.reset_progress();
        tracing::debug!(size = self.problems.len(), "generated new batch");
        Ok(())
    }

    fn reset_progress(&mut self) {
        self.phase = Phase::Answering;
        self.score = 0;
        self.selected.clear();
    }

    fn require_phase(&self, phase: Phase, reason: &str) -> Result<(), DrillError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(DrillError::InvalidState(reason.to_string()))
        }
    }
}

fn load_batch<S, C>(book: &mut PracticeBook<S, C>, mode: PracticeMode) -> Result<Vec<Problem>, ExitReason>
where
    S: KeyValueStore,
    C: Clock,
{
    let size = book.limits().batch_size;
    let batch = match mode {
        PracticeMode::ErrorReview => {
            let pool = book.error_problems();
            if pool.is_empty() {
                Err(ExitReason::NoErrorsToReview)
            } else {
                Ok(generate_batch(size, Some(pool.as_slice())))
            }
        }
        PracticeMode::Fresh => book.quota_gate().map(|()| generate_batch(size, None)),
    };

    if let Err(reason) = &batch {
        tracing::info!(mode = mode.as_str(), reason = reason.as_str(), "practice unavailable");
        metrics::record_session_exit(*reason);
    }
    batch
}
