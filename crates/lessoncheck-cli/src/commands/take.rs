//! The `lessoncheck take` command: an interactive attempt on stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

use lessoncheck_core::parser::parse_lesson;
use lessoncheck_core::{AssessmentAttempt, InlineCheck, Progress, ScoreSummary};

use super::{attempt_bank, BankFilter};
use crate::config::load_config_from;
use crate::console::{render_check, render_feedback, render_question, summary_table};

pub fn execute(
    bank_path: PathBuf,
    with_checks: bool,
    save: bool,
    output: Option<PathBuf>,
    filter: BankFilter,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let lesson = parse_lesson(&bank_path, &config.load_options())?;
    let (bank, drawn) = attempt_bank(&lesson, &filter)?;
    let time_limit = if drawn {
        lesson.exam.as_ref().and_then(|exam| exam.time_limit())
    } else {
        None
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    writeln!(
        out,
        "{} ({} questions, pass mark {}%)",
        bank.title(),
        bank.len(),
        bank.passing_score_percent()
    )?;
    if let Some(limit) = time_limit {
        writeln!(out, "Time limit: {} minutes", limit.as_secs().div_ceil(60))?;
    }

    if with_checks {
        for check in &lesson.checks {
            run_check(&mut check.clone(), &mut input, &mut out)?;
        }
    }

    let mut attempt = AssessmentAttempt::new(Arc::clone(&bank));
    let deadline = time_limit.map(|limit| (Instant::now() + limit, limit));
    let summary = run_attempt(&mut attempt, &mut input, &mut out, deadline)?;
    writeln!(out, "\n{}", summary_table(bank.title(), &summary))?;

    if save || output.is_some() {
        let dir = output.unwrap_or(config.output_dir);
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("attempt-{timestamp}.json"));
        attempt.record()?.save_json(&path)?;
        tracing::info!(attempt = %attempt.id(), "attempt record written");
        eprintln!("Attempt saved to: {}", path.display());
    }

    Ok(())
}

/// Run an attempt to completion, reading one answer per question.
///
/// An answer entered after the deadline abandons the attempt.
pub fn run_attempt<R: BufRead, W: Write>(
    attempt: &mut AssessmentAttempt,
    input: &mut R,
    out: &mut W,
    deadline: Option<(Instant, Duration)>,
) -> Result<ScoreSummary> {
    while let Some(view) = attempt.view() {
        write!(out, "{}", render_question(&view))?;
        let choice = read_choice(input, out, view.options.len())?;

        if let Some((at, limit)) = deadline {
            if Instant::now() > at {
                anyhow::bail!(
                    "time limit of {} minutes exceeded after {} of {} questions",
                    limit.as_secs().div_ceil(60),
                    attempt.answered_count(),
                    attempt.bank().len()
                );
            }
        }

        let feedback = attempt.submit_answer(choice)?;
        write!(out, "{}", render_feedback(&feedback, attempt.current_question()?))?;

        if let Progress::Completed(summary) = attempt.advance()? {
            return Ok(summary);
        }
    }
    Ok(attempt.score()?)
}

fn run_check<R: BufRead, W: Write>(check: &mut InlineCheck, input: &mut R, out: &mut W) -> Result<()> {
    write!(out, "{}", render_check(check.question()))?;
    let choice = read_choice(input, out, check.question().options.len())?;
    let feedback = check.submit(choice)?;
    write!(out, "{}", render_feedback(&feedback, check.question()))?;
    Ok(())
}

/// Prompt until a 1-based option number is entered; returns it 0-based.
fn read_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W, option_count: usize) -> Result<usize> {
    loop {
        write!(out, "Your answer [1-{option_count}]: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before the attempt was finished");
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => return Ok(n - 1),
            _ => writeln!(out, "Please enter a number between 1 and {option_count}.")?,
        }
    }
}
