//! The `paperly practice` command.
//!
//! Runs an interactive session over stdin. Each line is one command:
//!
//! - `<n>` selects option `n` for the current question and moves on
//! - `n` / `p` step to the next or previous question
//! - `g <k>` jumps to question `k`
//! - `doubt <text>` asks for help with the current question
//! - `submit` ends the session and shows the result
//! - `quit` leaves without submitting
//!
//! End of input submits.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use paperly_core::doubt::explain;
use paperly_core::generate;
use paperly_core::model::{PaperId, Question};
use paperly_core::practice::PracticeSummary;
use paperly_core::PracticeSession;

use super::{open_configured, ParamsArgs};

pub async fn execute(
    paper: Option<PaperId>,
    params_args: ParamsArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = open_configured(config_path)?;

    let questions = match paper {
        Some(id) => {
            let paper = store.get(id).await?;
            println!(
                "Practicing '{}' ({} questions, {} total marks)",
                paper.metadata().title,
                paper.questions().len(),
                paper.total_marks()
            );
            paper.into_questions()
        }
        None => {
            let params = params_args.resolve(&config)?;
            println!(
                "Practicing a fresh {}-question paper",
                params.question_count
            );
            generate(&params)
        }
    };

    let mut session = PracticeSession::new(questions);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if run_session(&mut session, stdin.lock(), &mut stdout)?.is_none() {
        println!("Session abandoned.");
    }
    Ok(())
}

/// Drive a session from line-oriented input.
///
/// Returns the summary once the session is submitted, or `None` if the user
/// quit first.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut PracticeSession,
    input: R,
    out: &mut W,
) -> Result<Option<PracticeSummary>> {
    anyhow::ensure!(!session.is_empty(), "paper has no questions to practice");

    writeln!(out, "Commands: <option number>, n, p, g <k>, doubt <text>, submit, quit")?;
    render_current(session, out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            "submit" => break,
            "quit" => return Ok(None),
            "n" => {
                if session.next() {
                    render_current(session, out)?;
                } else {
                    writeln!(out, "Already at the last question. Type `submit` to finish.")?;
                }
            }
            "p" => {
                if session.previous() {
                    render_current(session, out)?;
                } else {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            _ => {
                if let Some(rest) = line
                    .strip_prefix("doubt")
                    .filter(|r| r.is_empty() || r.starts_with(' '))
                {
                    answer_doubt(session, rest, out)?;
                } else if let Some(rest) = line.strip_prefix("g ") {
                    match parse_position(rest) {
                        Some(index) => match session.seek(index) {
                            Ok(()) => render_current(session, out)?,
                            Err(e) => writeln!(out, "{e}")?,
                        },
                        None => writeln!(out, "Questions are numbered from 1.")?,
                    }
                } else if let Ok(number) = line.parse::<usize>() {
                    match number.checked_sub(1) {
                        Some(option) => select(session, option, out)?,
                        None => writeln!(out, "Options are numbered from 1.")?,
                    }
                } else {
                    writeln!(out, "Unknown command: {line}")?;
                }
            }
        }
    }

    session.submit();
    let summary = session.summary()?;
    print_summary(&summary, session.questions(), out)?;
    Ok(Some(summary))
}

/// 1-based position from user input, as a 0-based index.
fn parse_position(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok()?.checked_sub(1)
}

fn select<W: Write>(session: &mut PracticeSession, option: usize, out: &mut W) -> Result<()> {
    if let Err(e) = session.select_current(option) {
        writeln!(out, "{e}")?;
        return Ok(());
    }
    if session.next() {
        render_current(session, out)?;
    } else {
        writeln!(
            out,
            "Answered {} of {}. Type `submit` to finish.",
            session.answered_count(),
            session.len()
        )?;
    }
    Ok(())
}

fn answer_doubt<W: Write>(session: &PracticeSession, doubt: &str, out: &mut W) -> Result<()> {
    let Some(question) = session.current_question() else {
        return Ok(());
    };
    match explain(question, doubt) {
        Some(response) => {
            writeln!(out, "Correct answer: {}", response.correct_answer)?;
            writeln!(out, "{}", response.explanation)?;
        }
        None => writeln!(out, "Type your doubt after `doubt`.")?,
    }
    Ok(())
}

fn render_current<W: Write>(session: &PracticeSession, out: &mut W) -> Result<()> {
    let index = session.position();
    let Some(q) = session.current_question() else {
        return Ok(());
    };
    writeln!(
        out,
        "\nQuestion {} of {} [{}, {} marks]",
        index + 1,
        session.len(),
        q.difficulty,
        q.marks
    )?;
    writeln!(out, "{}", q.text)?;
    let selected = session.selected(index);
    for (i, option) in q.options.iter().enumerate() {
        let marker = if selected == Some(i) { "*" } else { " " };
        writeln!(out, " {marker}{}) {option}", i + 1)?;
    }
    Ok(())
}

fn print_summary<W: Write>(
    summary: &PracticeSummary,
    questions: &[Question],
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "\nScore: {}/{} ({}%)",
        summary.score.earned_marks, summary.score.total_marks, summary.percentage
    )?;
    writeln!(out, "{}", summary.performance.message())?;
    writeln!(
        out,
        "Correct: {} | Answered: {} of {}",
        summary.correct_count,
        summary.answered_count,
        questions.len()
    )?;

    for review in &summary.reviews {
        let q = &questions[review.index];
        let verdict = if review.is_unanswered() {
            "unanswered"
        } else if review.is_correct {
            "correct"
        } else {
            "wrong"
        };
        let yours = review
            .selected
            .and_then(|i| q.options.get(i))
            .map(String::as_str)
            .unwrap_or("-");
        writeln!(
            out,
            "  Q{}: {verdict} (yours: {yours}, answer: {})",
            review.index + 1,
            q.correct_option().unwrap_or("?")
        )?;
    }
    Ok(())
}
