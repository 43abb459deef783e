//! Line-based terminal screens over the practice flow.

use std::io::{self, BufRead, Write};

use chrono::Local;
use md_app::{
    Clock, DrillError, EliminationOutcome, Phase, PracticeBook, PracticeMode, Session,
    feedback::AccuracyBand,
};
use md_store::KeyValueStore;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }
}

enum Screen {
    Home,
    Practice(PracticeMode),
    History,
    Errors,
    Quit,
}

/// Run the screens until the learner quits or input ends.
pub fn run<R, W, S, C>(console: &mut Console<R, W>, book: &mut PracticeBook<S, C>) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let mut screen = Screen::Home;
    loop {
        screen = match screen {
            Screen::Home => home(console, book)?,
            Screen::Practice(mode) => practice(console, book, mode)?,
            Screen::History => history(console, book)?,
            Screen::Errors => errors(console, book)?,
            Screen::Quit => return Ok(()),
        };
    }
}

fn home<R, W, S, C>(console: &mut Console<R, W>, book: &mut PracticeBook<S, C>) -> io::Result<Screen>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let summary = book.summary();
    console.say("")?;
    console.say("== Mental math: two-digit addition and subtraction ==")?;
    console.say(format!(
        "Practice today: {}/{}    Errors: {}/{}",
        summary.daily_count, summary.daily_limit, summary.error_count, summary.error_capacity
    ))?;
    if summary.error_capacity_reached() {
        console.say("The error collection is full, practice your errors first.")?;
    }
    console.say("[1] practice  [2] history  [3] error collection  [4] review errors  [q] quit")?;

    let Some(choice) = console.prompt("> ")? else {
        return Ok(Screen::Quit);
    };
    Ok(match choice.as_str() {
        "1" => Screen::Practice(PracticeMode::Fresh),
        "2" => Screen::History,
        "3" => Screen::Errors,
        "4" => Screen::Practice(PracticeMode::ErrorReview),
        "q" => Screen::Quit,
        _ => Screen::Home,
    })
}

fn practice<R, W, S, C>(
    console: &mut Console<R, W>,
    book: &mut PracticeBook<S, C>,
    mode: PracticeMode,
) -> io::Result<Screen>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let mut session = match Session::start(book, mode) {
        Ok(session) => session,
        Err(reason) => {
            console.say(reason.to_string())?;
            return Ok(Screen::Errors);
        }
    };

    loop {
        match session.phase() {
            Phase::Answering => {
                console.say(format!(
                    "\n{} problems, type each answer ([q] leaves)",
                    session.problems().len()
                ))?;
                if !answer_batch(console, &mut session)? {
                    return Ok(Screen::Home);
                }

                let report = match session.grade(book) {
                    Ok(report) => report,
                    Err(e) => {
                        console.say(e.to_string())?;
                        continue;
                    }
                };
                for (index, problem) in session.problems().iter().enumerate() {
                    let verdict = if problem.is_correct == Some(true) {
                        "ok".to_string()
                    } else {
                        format!("wrong, answer is {}", problem.result)
                    };
                    console.say(format!(
                        "{:>2}. {} = {}  {verdict}",
                        index + 1,
                        problem,
                        problem.user_answer.unwrap_or_default()
                    ))?;
                }
                console.say(report.tier.headline(report.score, report.total))?;
                console.say(report.tier.message())?;
            }
            Phase::Checked => {
                let label = match mode {
                    PracticeMode::Fresh => "[n] new batch  [enter] home: ",
                    PracticeMode::ErrorReview => "[r] review again  [enter] home: ",
                };
                let choice = console.prompt(label)?;
                match (mode, choice.as_deref()) {
                    (PracticeMode::Fresh, Some("n")) => match session.new_batch(book) {
                        Ok(()) => {}
                        Err(DrillError::Exit(reason)) => {
                            console.say(reason.to_string())?;
                            return Ok(Screen::Errors);
                        }
                        Err(e) => console.say(e.to_string())?,
                    },
                    (PracticeMode::ErrorReview, Some("r")) => {
                        return Ok(Screen::Practice(PracticeMode::ErrorReview));
                    }
                    _ => return Ok(Screen::Home),
                }
            }
            Phase::EliminationOffered => {
                console.say("All correct! Pick two problems to remove from your errors:")?;
                for (index, problem) in session.problems().iter().enumerate() {
                    console.say(format!("{:>2}. {} = {}", index + 1, problem, problem.result))?;
                }
                let Some(line) = console.prompt("two numbers, e.g. `1 3` ([enter] home): ")? else {
                    return Ok(Screen::Quit);
                };
                // The offer is optional; a batch of one can never be confirmed.
                if line.is_empty() || line == "q" {
                    return Ok(Screen::Home);
                }
                pick(&mut session, &line);

                match session.confirm_elimination(book) {
                    Ok(EliminationOutcome::Reloaded { remaining }) => {
                        console.say(format!("Two errors eliminated, {remaining} left."))?;
                    }
                    Ok(EliminationOutcome::Exit(reason)) => {
                        console.say(reason.to_string())?;
                        return Ok(Screen::Errors);
                    }
                    Err(e) => console.say(e.to_string())?,
                }
            }
        }
    }
}

/// Prompt for every problem in order. Returns `false` if the learner left.
fn answer_batch<R, W>(console: &mut Console<R, W>, session: &mut Session) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let problems: Vec<_> = session
        .problems()
        .iter()
        .map(|p| (p.id.clone(), p.to_string()))
        .collect();

    for (index, (id, text)) in problems.iter().enumerate() {
        loop {
            let Some(input) = console.prompt(&format!("{:>2}. {text} = ", index + 1))? else {
                return Ok(false);
            };
            if input == "q" {
                return Ok(false);
            }
            if input.is_empty() {
                continue;
            }
            match session.set_answer(id, &input) {
                Ok(()) => break,
                Err(e) => console.say(e.to_string())?,
            }
        }
    }
    Ok(true)
}

/// Replace the current picks with the 1-based positions listed in `line`.
///
/// Only called while elimination is offered, with ids taken from the batch,
/// so toggling cannot fail.
fn pick(session: &mut Session, line: &str) {
    for id in session.selected().to_vec() {
        session.toggle_selection(&id).ok();
    }

    let ids: Vec<String> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|part| part.parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter_map(|index| session.problems().get(index).map(|p| p.id.clone()))
        .collect();
    for id in ids {
        session.toggle_selection(&id).ok();
    }
}

fn history<R, W, S, C>(console: &mut Console<R, W>, book: &mut PracticeBook<S, C>) -> io::Result<Screen>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let records = book.history();
    if records.is_empty() {
        console.say("No practice yet. Finish a batch to see it here.")?;
    } else {
        console.say(format!("{} records", records.len()))?;
        for record in &records {
            console.say(format!(
                "{}  {}/{}  {:.0}% ({})",
                record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                record.score,
                record.total,
                record.accuracy,
                AccuracyBand::from_accuracy(record.accuracy).label()
            ))?;
        }
    }

    Ok(match console.prompt("[enter] home: ")? {
        Some(_) => Screen::Home,
        None => Screen::Quit,
    })
}

fn errors<R, W, S, C>(console: &mut Console<R, W>, book: &mut PracticeBook<S, C>) -> io::Result<Screen>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    let problems = book.error_problems();
    if problems.is_empty() {
        console.say("No errors, well done!")?;
        return Ok(match console.prompt("[enter] home: ")? {
            Some(_) => Screen::Home,
            None => Screen::Quit,
        });
    }

    console.say(format!("{} errors", problems.len()))?;
    for (index, problem) in problems.iter().enumerate() {
        console.say(format!("{:>3}. {} = {}", index + 1, problem, problem.result))?;
    }

    let Some(choice) = console.prompt("[r] review  [d N] remove #N  [enter] home: ")? else {
        return Ok(Screen::Quit);
    };
    if choice == "r" {
        return Ok(Screen::Practice(PracticeMode::ErrorReview));
    }
    if let Some(n) = choice.strip_prefix('d').and_then(|n| n.trim().parse::<usize>().ok()) {
        if let Some(problem) = n.checked_sub(1).and_then(|index| problems.get(index)) {
            book.remove_error(&problem.id);
            console.say(format!("Removed {problem}"))?;
        }
        return Ok(Screen::Errors);
    }
    Ok(Screen::Home)
}
