use std::fmt;

use serde::{Deserialize, Serialize};

/// Arithmetic operator of a drill problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition, serialized as `"+"`
    #[serde(rename = "+")]
    Add,
    /// Subtraction, serialized as `"-"`
    #[serde(rename = "-")]
    Sub,
}

impl Operator {
    /// The symbol used in problem ids and on screen.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single two-operand problem together with the learner's answer.
///
/// Field names serialize in camelCase so records written by the browser
/// version of the app (`userAnswer`, `isCorrect`) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Deterministic key, e.g. `"57-23"`
    pub id: String,
    /// Left operand (the larger one for subtraction)
    pub num1: u32,
    /// Right operand
    pub num2: u32,
    /// Operator applied to the operands
    pub operator: Operator,
    /// Expected answer
    pub result: u32,
    /// What the learner typed, if anything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<u32>,
    /// Set at grading time only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

/// Build the id of a problem from its parts.
pub fn problem_id(num1: u32, operator: Operator, num2: u32) -> String {
    format!("{num1}{}{num2}", operator.symbol())
}

impl Problem {
    /// Create a problem, swapping the operands of a subtraction so the
    /// result is never negative.
    pub fn new(num1: u32, num2: u32, operator: Operator) -> Self {
        let (num1, num2) = match operator {
            Operator::Sub if num1 < num2 => (num2, num1),
            _ => (num1, num2),
        };
        let result = match operator {
            Operator::Add => num1 + num2,
            Operator::Sub => num1 - num2,
        };

        Self {
            id: problem_id(num1, operator, num2),
            num1,
            num2,
            operator,
            result,
            user_answer: None,
            is_correct: None,
        }
    }

    /// Whether the learner has entered an answer.
    pub const fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    /// Grade the problem in place and return the verdict.
    pub fn check(&mut self) -> bool {
        let correct = self.user_answer == Some(self.result);
        self.is_correct = Some(correct);
        correct
    }

    /// Copy of the problem with answer and verdict cleared.
    pub fn cleared(&self) -> Self {
        Self {
            user_answer: None,
            is_correct: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.num1, self.operator, self.num2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtraction_swaps_operands() {
        let problem = Problem::new(23, 57, Operator::Sub);
        assert_eq!(problem.num1, 57);
        assert_eq!(problem.num2, 23);
        assert_eq!(problem.result, 34);
        assert_eq!(problem.id, "57-23");
    }

    #[test]
    fn test_addition_keeps_order() {
        let problem = Problem::new(23, 57, Operator::Add);
        assert_eq!(problem.id, "23+57");
        assert_eq!(problem.result, 80);
    }

    #[test]
    fn test_check_sets_verdict() {
        let mut problem = Problem::new(40, 12, Operator::Sub);
        assert!(!problem.check()); // unanswered counts as wrong
        assert_eq!(problem.is_correct, Some(false));

        problem.user_answer = Some(28);
        assert!(problem.check());
        assert_eq!(problem.is_correct, Some(true));
    }

    #[test]
    fn test_serialized_field_names() {
        let mut problem = Problem::new(12, 34, Operator::Add);
        problem.user_answer = Some(40);
        problem.check();

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["operator"], "+");
        assert_eq!(json["userAnswer"], 40);
        assert_eq!(json["isCorrect"], false);

        // Unanswered problems omit the optional fields entirely
        let json = serde_json::to_value(problem.cleared()).unwrap();
        assert!(json.get("userAnswer").is_none());
        assert!(json.get("isCorrect").is_none());
    }

    #[test]
    fn test_loads_browser_record() {
        let raw = r#"{"id":"88-19","num1":88,"num2":19,"operator":"-","result":69,"userAnswer":79,"isCorrect":false}"#;
        let problem: Problem = serde_json::from_str(raw).unwrap();
        assert_eq!(problem.operator, Operator::Sub);
        assert_eq!(problem.user_answer, Some(79));
        assert_eq!(problem.to_string(), "88 - 19");
    }
}
