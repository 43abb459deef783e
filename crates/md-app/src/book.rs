//! The learner's persisted practice state.
//!
//! `PracticeBook` owns the storage backend and the clock and exposes the
//! storage-facing operations the views call into: committing a graded batch,
//! eliminating errors, and reading history and the error collection. The
//! daily quota lives in [`crate::quota`].

use md_gen::{DEFAULT_BATCH_SIZE, GradedBatch, Problem};
use md_store::{
    KeyValueStore,
    models::PracticeRecord,
    repositories::{errors, history},
};

use crate::{clock::Clock, session::PracticeMode};

/// Numeric limits of the practice flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeLimits {
    /// Problems per batch
    pub batch_size: usize,
    /// Fresh batches that may be graded per calendar day
    pub daily_limit: u32,
    /// Error-set size at which fresh practice is blocked
    pub error_capacity: usize,
}

impl Default for PracticeLimits {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            daily_limit: 3,
            error_capacity: 100,
        }
    }
}

/// Side effects of committing a graded batch.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeCommit {
    /// The history entry that was written
    pub record: PracticeRecord,
    /// New entries in the error set
    pub errors_added: usize,
    /// Whether the learner may now eliminate two errors
    pub elimination_offered: bool,
}

#[derive(Debug)]
pub struct PracticeBook<S, C> {
    store: S,
    clock: C,
    limits: PracticeLimits,
}

impl<S, C> PracticeBook<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub const fn new(store: S, clock: C, limits: PracticeLimits) -> Self {
        Self {
            store,
            clock,
            limits,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn limits(&self) -> PracticeLimits {
        self.limits
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Practice history, newest first.
    pub fn history(&self) -> Vec<PracticeRecord> {
        history::practice_history(&self.store)
    }

    /// The error collection in insertion order.
    pub fn error_problems(&self) -> Vec<Problem> {
        errors::error_problems(&self.store)
    }

    /// Persist the outcome of a graded batch.
    ///
    /// Always appends a history record and merges the incorrect problems into
    /// the error set. Fresh batches also count against the daily quota.
    /// Elimination is offered only for a perfect error-review batch.
    pub fn commit_grading(&mut self, mode: PracticeMode, graded: &GradedBatch) -> GradeCommit {
        let record = history::save_practice_record(
            &mut self.store,
            graded.score,
            graded.total,
            self.clock.now(),
        );

        if mode == PracticeMode::Fresh {
            let count = self.increment_daily_count();
            tracing::debug!(count, "daily practice count incremented");
        }

        let errors_added = errors::merge_error_problems(&mut self.store, &graded.problems);
        let error_count = self.error_count();
        if error_count > self.limits.error_capacity {
            // Insertion is never blocked; only new practice is.
            tracing::warn!(
                error_count,
                capacity = self.limits.error_capacity,
                "error set is above capacity"
            );
        }

        GradeCommit {
            record,
            errors_added,
            elimination_offered: mode == PracticeMode::ErrorReview && graded.is_perfect(),
        }
    }

    /// Remove the two given ids from the persisted error set.
    ///
    /// Reads the set fresh, so entries removed elsewhere are simply skipped.
    /// Returns the number of errors left.
    pub fn eliminate<I: AsRef<str>>(&mut self, ids: &[I; 2]) -> usize {
        let (remaining, removed) = errors::remove_error_problems(&mut self.store, ids);
        tracing::info!(removed, remaining, "eliminated errors");
        crate::metrics::record_elimination(removed, remaining);
        remaining
    }

    /// Remove one entry from the error collection.
    pub fn remove_error(&mut self, id: &str) -> bool {
        let removed = errors::remove_error_problem(&mut self.store, id);
        if removed {
            tracing::info!(id, "removed error from collection");
        }
        removed
    }

    /// Empty the error collection.
    pub fn clear_errors(&mut self) {
        errors::clear_error_problems(&mut self.store);
        tracing::info!("cleared error collection");
    }
}
