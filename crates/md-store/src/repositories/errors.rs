use std::collections::HashSet;

use crate::{KeyValueStore, keys, load, models::Problem, save};

/// The error set, in insertion order.
pub fn error_problems<S>(store: &S) -> Vec<Problem>
where
    S: KeyValueStore + ?Sized,
{
    load(store, keys::ERRORS)
}

pub fn error_count<S>(store: &S) -> usize
where
    S: KeyValueStore + ?Sized,
{
    error_problems(store).len()
}

/// Add the problems not marked correct, skipping ids already present.
///
/// The set is not capped here; callers gate new practice on its size.
/// Returns the number of entries added.
pub fn merge_error_problems<S>(store: &mut S, problems: &[Problem]) -> usize
where
    S: KeyValueStore + ?Sized,
{
    let mut errors = error_problems(store);
    let mut known: HashSet<String> = errors.iter().map(|p| p.id.clone()).collect();

    let before = errors.len();
    for problem in problems.iter().filter(|p| p.is_correct != Some(true)) {
        if known.insert(problem.id.clone()) {
            errors.push(problem.clone());
        }
    }

    let added = errors.len() - before;
    if added > 0 {
        save(store, keys::ERRORS, &errors);
    }
    added
}

/// Remove a single entry. Returns whether it was present.
pub fn remove_error_problem<S>(store: &mut S, id: &str) -> bool
where
    S: KeyValueStore + ?Sized,
{
    remove_error_problems(store, &[id]).1 > 0
}

/// Remove every entry whose id is in `ids`.
///
/// Returns `(remaining, removed)`.
pub fn remove_error_problems<S, I>(store: &mut S, ids: &[I]) -> (usize, usize)
where
    S: KeyValueStore + ?Sized,
    I: AsRef<str>,
{
    let mut errors = error_problems(store);
    let before = errors.len();
    errors.retain(|p| !ids.iter().any(|id| id.as_ref() == p.id));

    let removed = before - errors.len();
    if removed > 0 {
        save(store, keys::ERRORS, &errors);
    }
    (errors.len(), removed)
}

pub fn clear_error_problems<S>(store: &mut S)
where
    S: KeyValueStore + ?Sized,
{
    store.remove(keys::ERRORS);
}
