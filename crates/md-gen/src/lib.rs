//! Problem generation and grading for the arithmetic drills
//!
//! This crate holds the pure part of the drill: the problem model, the batch
//! generator and the grader. It performs no I/O; persistence lives in
//! `md-store` and the practice flow in `md-app`.

mod problem;

use std::{collections::HashSet, ops::RangeInclusive};

use rand::Rng;

pub use problem::{Operator, Problem, problem_id};

/// Operands are two-digit numbers.
pub const OPERAND_RANGE: RangeInclusive<u32> = 10..=99;

/// Largest accepted result.
pub const MAX_RESULT: u32 = 100;

/// Number of problems in a regular batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Draws allowed per batch before duplicate ids are tolerated.
pub const MAX_DRAW_ATTEMPTS: usize = 10_000;

/// Generate a batch with the thread-local RNG.
///
/// See [`generate_batch_with`].
pub fn generate_batch(size: usize, pool: Option<&[Problem]>) -> Vec<Problem> {
    generate_batch_with(&mut rand::thread_rng(), size, pool)
}

/// Generate a batch of problems.
///
/// # Arguments
///
/// * `rng` - Random source for fresh problems
/// * `size` - Wanted batch size
/// * `pool` - Existing problems to review instead of drawing new ones
///
/// # Behavior
///
/// With a pool, the first `size` problems are taken in order with their
/// answers cleared; a shorter pool yields a shorter batch.
///
/// Without a pool, candidates are drawn until `size` distinct ids are
/// collected. Candidates whose result exceeds [`MAX_RESULT`] are rejected.
/// Once [`MAX_DRAW_ATTEMPTS`] draws have been spent, duplicate ids are
/// accepted so the loop always terminates.
pub fn generate_batch_with<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    pool: Option<&[Problem]>,
) -> Vec<Problem> {
    if let Some(pool) = pool {
        return pool.iter().take(size).map(Problem::cleared).collect();
    }

    let mut batch = Vec::with_capacity(size);
    let mut seen = HashSet::with_capacity(size);
    let mut attempts = 0usize;

    while batch.len() < size {
        attempts += 1;
        if attempts == MAX_DRAW_ATTEMPTS + 1 {
            tracing::warn!(
                size,
                collected = batch.len(),
                "draw budget exhausted, accepting duplicate problems"
            );
        }

        let Some(candidate) = draw_candidate(rng) else {
            continue;
        };

        if seen.insert(candidate.id.clone()) || attempts > MAX_DRAW_ATTEMPTS {
            batch.push(candidate);
        }
    }

    tracing::debug!(size, attempts, "generated fresh batch");
    batch
}

/// Draw one problem satisfying the numeric constraints.
pub fn draw_problem<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    loop {
        if let Some(problem) = draw_candidate(rng) {
            return problem;
        }
    }
}

fn draw_candidate<R: Rng + ?Sized>(rng: &mut R) -> Option<Problem> {
    let num1 = rng.gen_range(OPERAND_RANGE);
    let num2 = rng.gen_range(OPERAND_RANGE);
    let operator = if rng.gen_bool(0.5) {
        Operator::Add
    } else {
        Operator::Sub
    };

    let problem = Problem::new(num1, num2, operator);
    (problem.result <= MAX_RESULT).then_some(problem)
}

/// Outcome of grading a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedBatch {
    /// Number of correct answers
    pub score: usize,
    /// Batch size
    pub total: usize,
    /// The batch with `is_correct` filled in
    pub problems: Vec<Problem>,
}

impl GradedBatch {
    /// Every problem answered correctly (an empty batch is never perfect).
    pub const fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }

    /// Problems answered incorrectly.
    pub fn incorrect(&self) -> impl Iterator<Item = &Problem> {
        self.problems
            .iter()
            .filter(|problem| problem.is_correct != Some(true))
    }
}

/// Grade a batch: a problem is correct when its answer equals its result.
pub fn grade_batch(problems: &[Problem]) -> GradedBatch {
    let mut problems = problems.to_vec();
    let score = problems
        .iter_mut()
        .map(Problem::check)
        .filter(|correct| *correct)
        .count();

    GradedBatch {
        score,
        total: problems.len(),
        problems,
    }
}
