use crate::error::DrillError;

/// Parse what the learner typed into an answer.
///
/// Blank input clears the answer. Zero is a valid answer; negative and
/// non-numeric input is rejected.
///
/// # Examples
/// ```
/// use md_app::validation::parse_answer;
///
/// assert_eq!(parse_answer(" 42 ").unwrap(), Some(42));
/// assert_eq!(parse_answer("").unwrap(), None);
/// assert!(parse_answer("-3").is_err());
/// ```
pub fn parse_answer(input: &str) -> Result<Option<u32>, DrillError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: i64 = trimmed.parse().map_err(|_| {
        DrillError::Validation(format!("'{}' is not a whole number", trimmed))
    })?;

    if value < 0 {
        return Err(DrillError::Validation(
            "Answer cannot be negative".to_string(),
        ));
    }

    u32::try_from(value)
        .map(Some)
        .map_err(|_| DrillError::Validation("Answer is too large".to_string()))
}
