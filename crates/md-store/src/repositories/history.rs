use chrono::{DateTime, Utc};

use crate::{KeyValueStore, keys, load, models::PracticeRecord, save};

/// Maximum number of records kept; the oldest are dropped first.
pub const HISTORY_CAPACITY: usize = 100;

/// Practice history, newest first.
pub fn practice_history<S>(store: &S) -> Vec<PracticeRecord>
where
    S: KeyValueStore + ?Sized,
{
    load(store, keys::HISTORY)
}

/// Prepend a record for a batch graded at `at` and return it.
pub fn save_practice_record<S>(
    store: &mut S,
    score: usize,
    total: usize,
    at: DateTime<Utc>,
) -> PracticeRecord
where
    S: KeyValueStore + ?Sized,
{
    let record = PracticeRecord::new(score, total, at);

    let mut history = practice_history(store);
    history.insert(0, record.clone());
    history.truncate(HISTORY_CAPACITY);
    save(store, keys::HISTORY, &history);

    record
}
