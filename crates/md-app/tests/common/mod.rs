use chrono::NaiveDate;
use md_app::{FixedClock, PracticeBook, PracticeLimits, Session};
use md_gen::{Operator, Problem};
use md_store::{MemoryStore, repositories::errors};

pub type TestBook = PracticeBook<MemoryStore, FixedClock>;

/// Test book builder over an in-memory store and a fixed clock
pub struct TestBookBuilder {
    date: NaiveDate,
    limits: PracticeLimits,
    errors: usize,
}

impl TestBookBuilder {
    pub fn new() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date"),
            limits: PracticeLimits::default(),
            errors: 0,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn limits(mut self, limits: PracticeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Pre-fill the error set with `count` distinct wrong answers
    pub fn with_errors(mut self, count: usize) -> Self {
        self.errors = count;
        self
    }

    /// Build the book and return a handle on its clock
    pub fn build(self) -> (TestBook, FixedClock) {
        let clock = FixedClock::on(self.date);
        let mut book = PracticeBook::new(MemoryStore::new(), clock.clone(), self.limits);
        if self.errors > 0 {
            errors::merge_error_problems(book.store_mut(), &wrong_problems(self.errors));
        }
        (book, clock)
    }
}

impl Default for TestBookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` distinct subtraction problems answered incorrectly
pub fn wrong_problems(count: usize) -> Vec<Problem> {
    (10..=99u32)
        .flat_map(|num1| (10..=num1).map(move |num2| (num1, num2)))
        .take(count)
        .map(|(num1, num2)| {
            let mut problem = Problem::new(num1, num2, Operator::Sub);
            problem.user_answer = Some(problem.result + 1);
            problem.check();
            problem
        })
        .collect()
}

/// Type an answer for every problem of the current batch
pub fn answer_all(session: &mut Session, correct: bool) {
    let answers: Vec<(String, String)> = session
        .problems()
        .iter()
        .map(|problem| {
            let value = if correct {
                problem.result
            } else {
                problem.result + 1
            };
            (problem.id.clone(), value.to_string())
        })
        .collect();

    for (id, value) in answers {
        session
            .set_answer(&id, &value)
            .expect("Failed to set answer");
    }
}

pub fn ids(problems: &[Problem]) -> Vec<String> {
    problems.iter().map(|p| p.id.clone()).collect()
}
