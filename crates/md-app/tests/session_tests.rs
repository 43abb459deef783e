use std::collections::HashSet;

use crate::common::{self, TestBookBuilder};
use md_app::{DrillError, Phase, PracticeMode, Session, feedback::ResultTier};

#[test]
fn test_fresh_batch_all_correct() {
    let (mut book, _) = TestBookBuilder::new().build();

    let mut session =
        Session::start(&mut book, PracticeMode::Fresh).expect("Fresh practice should start");
    assert_eq!(session.problems().len(), 10);
    assert_eq!(session.phase(), Phase::Answering);
    assert!(!session.all_answered());

    common::answer_all(&mut session, true);
    assert!(session.can_grade());

    let report = session.grade(&mut book).expect("Failed to grade");
    assert_eq!(report.score, 10);
    assert_eq!(report.total, 10);
    assert_eq!(report.tier, ResultTier::Perfect);
    assert_eq!(report.errors_added, 0);
    assert!(!report.elimination_offered);

    assert_eq!(session.phase(), Phase::Checked);
    assert_eq!(session.score(), 10);
    assert!(session.problems().iter().all(|p| p.is_correct == Some(true)));

    assert_eq!(book.daily_count(), 1);
    assert_eq!(book.error_count(), 0);

    let history = book.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score, 10);
    assert_eq!(history[0].accuracy, 100.0);
}

#[test]
fn test_fresh_batch_mistakes_go_to_error_set() {
    let (mut book, _) = TestBookBuilder::new().build();
    let mut session = Session::start(&mut book, PracticeMode::Fresh).unwrap();

    common::answer_all(&mut session, true);
    let wrong: Vec<_> = session.problems()[..3]
        .iter()
        .map(|p| (p.id.clone(), (p.result + 1).to_string()))
        .collect();
    for (id, value) in &wrong {
        session.set_answer(id, value).unwrap();
    }

    let report = session.grade(&mut book).unwrap();
    assert_eq!(report.score, 7);
    assert_eq!(report.tier, ResultTier::Good);
    assert_eq!(report.errors_added, 3);

    let stored: HashSet<_> = common::ids(&book.error_problems()).into_iter().collect();
    let expected: HashSet<_> = wrong.into_iter().map(|(id, _)| id).collect();
    assert_eq!(stored, expected);

    // Stored errors keep the wrong answer and the verdict
    assert!(
        book.error_problems()
            .iter()
            .all(|p| p.is_correct == Some(false) && p.user_answer == Some(p.result + 1))
    );
}

#[test]
fn test_new_batch_resets_progress() {
    let (mut book, _) = TestBookBuilder::new().build();
    let mut session = Session::start(&mut book, PracticeMode::Fresh).unwrap();
    common::answer_all(&mut session, false);
    session.grade(&mut book).unwrap();

    session.new_batch(&mut book).expect("Quota allows another batch");
    assert_eq!(session.phase(), Phase::Answering);
    assert_eq!(session.score(), 0);
    assert_eq!(session.problems().len(), 10);
    assert!(session.problems().iter().all(|p| p.user_answer.is_none()));
}

#[test]
fn test_new_batch_rechecks_daily_limit() {
    let (mut book, _) = TestBookBuilder::new().build();
    let mut session = Session::start(&mut book, PracticeMode::Fresh).unwrap();

    for _ in 0..2 {
        common::answer_all(&mut session, true);
        session.grade(&mut book).unwrap();
        session.new_batch(&mut book).unwrap();
    }

    // Third graded batch uses up the day
    common::answer_all(&mut session, true);
    session.grade(&mut book).unwrap();
    assert_eq!(book.daily_count(), 3);

    assert_eq!(
        session.new_batch(&mut book),
        Err(DrillError::Exit(md_app::ExitReason::DailyLimitReached))
    );
    // The graded batch stays on screen
    assert_eq!(session.phase(), Phase::Checked);
}

#[test]
fn test_review_batch_with_mistakes() {
    let (mut book, _) = TestBookBuilder::new().with_errors(4).build();
    let mut session = Session::start(&mut book, PracticeMode::ErrorReview).unwrap();
    assert_eq!(session.problems().len(), 4);
    // Previous wrong answers are not carried into the review batch
    assert!(!session.all_answered());

    common::answer_all(&mut session, false);
    let report = session.grade(&mut book).unwrap();

    assert_eq!(report.score, 0);
    assert_eq!(report.tier, ResultTier::KeepTrying);
    assert_eq!(report.errors_added, 0); // already in the set
    assert!(!report.elimination_offered);
    assert_eq!(session.phase(), Phase::Checked);

    assert_eq!(book.error_count(), 4);
    assert_eq!(book.daily_count(), 0);
    assert_eq!(book.history().len(), 1);
}

#[test]
fn test_review_batch_is_capped_at_batch_size() {
    let (mut book, _) = TestBookBuilder::new().with_errors(25).build();
    let session = Session::start(&mut book, PracticeMode::ErrorReview).unwrap();

    let expected = common::ids(&book.error_problems()[..10]);
    assert_eq!(common::ids(session.problems()), expected);
}

#[test]
fn test_empty_error_set_exits() {
    let (mut book, _) = TestBookBuilder::new().build();
    assert_eq!(
        Session::start(&mut book, PracticeMode::ErrorReview).unwrap_err(),
        md_app::ExitReason::NoErrorsToReview
    );
}
