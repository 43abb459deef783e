//! Daily quota tracking.
//!
//! Fresh practice is limited in two ways: a per-day count of graded fresh
//! batches, and the size of the error set. The counter is tied to a calendar
//! date and resets the first time it is touched on a new day.

use chrono::NaiveDate;
use md_store::{
    KeyValueStore,
    repositories::{daily, errors},
};

use crate::{book::PracticeBook, clock::Clock, session::ExitReason};

/// Format a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Numbers shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSummary {
    pub daily_count: u32,
    pub daily_limit: u32,
    pub error_count: usize,
    pub error_capacity: usize,
}

impl QuotaSummary {
    pub const fn daily_limit_reached(&self) -> bool {
        self.daily_count >= self.daily_limit
    }

    pub const fn error_capacity_reached(&self) -> bool {
        self.error_count >= self.error_capacity
    }
}

impl<S, C> PracticeBook<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    /// Today's date according to the book's clock.
    pub fn today(&self) -> String {
        format_date(self.clock().today())
    }

    /// Reset the counter if the stored date is not today.
    ///
    /// Idempotent within a day. Returns whether a reset happened.
    pub fn reset_if_new_day(&mut self) -> bool {
        let today = self.clock().today();
        if daily::last_practice_date(self.store()) == Some(today) {
            return false;
        }

        daily::set_daily_practice_count(self.store_mut(), 0);
        daily::set_last_practice_date(self.store_mut(), today);
        tracing::debug!(date = %today, "daily practice count reset");
        true
    }

    /// Fresh batches graded today.
    pub fn daily_count(&mut self) -> u32 {
        self.reset_if_new_day();
        daily::daily_practice_count(self.store())
    }

    /// Count one more fresh batch and return the new total.
    pub fn increment_daily_count(&mut self) -> u32 {
        let count = self.daily_count().saturating_add(1);
        daily::set_daily_practice_count(self.store_mut(), count);
        count
    }

    pub fn has_reached_daily_limit(&mut self) -> bool {
        self.daily_count() >= self.limits().daily_limit
    }

    /// Whether the error set leaves room for fresh practice.
    ///
    /// Independent of the daily counter.
    pub fn can_start_new_batch(&self) -> bool {
        self.error_count() < self.limits().error_capacity
    }

    pub fn error_count(&self) -> usize {
        errors::error_count(self.store())
    }

    /// Gate for fresh practice: the error set is checked before the daily limit.
    pub fn quota_gate(&mut self) -> Result<(), ExitReason> {
        if !self.can_start_new_batch() {
            return Err(ExitReason::ErrorCapacityReached);
        }
        if self.has_reached_daily_limit() {
            return Err(ExitReason::DailyLimitReached);
        }
        Ok(())
    }

    pub fn summary(&mut self) -> QuotaSummary {
        let limits = self.limits();
        QuotaSummary {
            daily_count: self.daily_count(),
            daily_limit: limits.daily_limit,
            error_count: self.error_count(),
            error_capacity: limits.error_capacity,
        }
    }
}
