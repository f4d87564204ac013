//! The `lessoncheck grade` command: score a scripted list of answers.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use lessoncheck_core::parser::parse_lesson;
use lessoncheck_core::presentation::{drive, NoopPresenter, Presenter};
use lessoncheck_core::AssessmentAttempt;

use super::{attempt_bank, BankFilter};
use crate::config::load_config_from;
use crate::console::ConsolePresenter;
use crate::OutputFormat;

pub fn execute(
    bank_path: PathBuf,
    answers: String,
    format: OutputFormat,
    fail_under_pass: bool,
    filter: BankFilter,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let lesson = parse_lesson(&bank_path, &config.load_options())?;
    let answers = parse_answers(&answers)?;
    let (bank, _) = attempt_bank(&lesson, &filter)?;

    anyhow::ensure!(
        answers.len() == bank.len(),
        "expected {} answers for '{}', got {}",
        bank.len(),
        bank.title(),
        answers.len()
    );

    tracing::info!("grading {} answers against '{}'", answers.len(), bank.title());
    let mut attempt = AssessmentAttempt::new(Arc::clone(&bank));
    let mut presenter: Box<dyn Presenter> = match format {
        OutputFormat::Text => Box::new(ConsolePresenter::new(Arc::clone(&bank))),
        OutputFormat::Json | OutputFormat::Markdown => Box::new(NoopPresenter),
    };
    let summary = drive(&mut attempt, &answers, presenter.as_mut()).context("grading failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&attempt.record()?)?),
        OutputFormat::Markdown => print!("{}", attempt.record()?.to_markdown()),
        OutputFormat::Text => {}
    }

    if fail_under_pass && !summary.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Parse a comma-separated list of 1-based option numbers into 0-based indices.
fn parse_answers(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let n: usize = part
                .parse()
                .with_context(|| format!("invalid answer '{part}': expected an option number"))?;
            anyhow::ensure!(n >= 1, "invalid answer '{part}': option numbers start at 1");
            Ok(n - 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_one_based() {
        assert_eq!(parse_answers("1,3, 2").unwrap(), vec![0, 2, 1]);
        assert_eq!(parse_answers("4,").unwrap(), vec![3]);
        assert!(parse_answers("").unwrap().is_empty());
    }

    #[test]
    fn zero_and_text_are_rejected() {
        assert!(parse_answers("1,0").is_err());
        let err = parse_answers("1,b").unwrap_err();
        assert!(err.to_string().contains("invalid answer 'b'"));
    }
}
