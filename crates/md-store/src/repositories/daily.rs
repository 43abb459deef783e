use chrono::NaiveDate;

use crate::{KeyValueStore, keys, load, save};

/// Raw daily counter, without any day-rollover check.
pub fn daily_practice_count<S>(store: &S) -> u32
where
    S: KeyValueStore + ?Sized,
{
    load(store, keys::DAILY_PRACTICE_COUNT)
}

pub fn set_daily_practice_count<S>(store: &mut S, count: u32)
where
    S: KeyValueStore + ?Sized,
{
    save(store, keys::DAILY_PRACTICE_COUNT, &count);
}

/// Date the counter belongs to.
///
/// Accepts both a JSON string and the bare `YYYY-MM-DD` text the browser
/// app wrote.
pub fn last_practice_date<S>(store: &S) -> Option<NaiveDate>
where
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(keys::LAST_PRACTICE_DATE)?;
    serde_json::from_str(&raw)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

pub fn set_last_practice_date<S>(store: &mut S, date: NaiveDate)
where
    S: KeyValueStore + ?Sized,
{
    save(store, keys::LAST_PRACTICE_DATE, &date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_defaults() {
        let store = MemoryStore::new();
        assert_eq!(daily_practice_count(&store), 0);
        assert_eq!(last_practice_date(&store), None);
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        set_daily_practice_count(&mut store, 2);
        set_last_practice_date(&mut store, date);

        assert_eq!(daily_practice_count(&store), 2);
        assert_eq!(last_practice_date(&store), Some(date));
        assert_eq!(
            store.get(keys::LAST_PRACTICE_DATE).as_deref(),
            Some("\"2024-03-09\"")
        );
    }

    #[test]
    fn test_browser_values() {
        let mut store = MemoryStore::new();
        store.set(keys::DAILY_PRACTICE_COUNT, "3".to_string());
        store.set(keys::LAST_PRACTICE_DATE, "2024-03-09".to_string());

        assert_eq!(daily_practice_count(&store), 3);
        assert_eq!(
            last_practice_date(&store),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn test_garbage_date_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set(keys::LAST_PRACTICE_DATE, "yesterday".to_string());
        assert_eq!(last_practice_date(&store), None);
    }
}
