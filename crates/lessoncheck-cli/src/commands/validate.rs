//! The `lessoncheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lessoncheck_core::parser::{collect_lesson_files, lint_lesson, parse_lesson};

use crate::config::load_config_from;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank_path.unwrap_or_else(|| config.banks_dir.clone());
    let options = config.load_options();

    let files = if bank_path.is_dir() {
        collect_lesson_files(&bank_path)?
    } else {
        vec![bank_path.clone()]
    };
    anyhow::ensure!(
        !files.is_empty(),
        "no lesson files found in {}",
        bank_path.display()
    );

    let mut total_warnings = 0;
    let mut failed = 0;

    for file in &files {
        let lesson = match parse_lesson(file, &options) {
            Ok(lesson) => lesson,
            Err(e) => {
                println!("{}: ERROR: {e:#}", file.display());
                failed += 1;
                continue;
            }
        };

        println!(
            "Bank: {} ({} questions, {} inline checks, pass mark {}%)",
            lesson.bank.title(),
            lesson.bank.len(),
            lesson.checks.len(),
            lesson.bank.passing_score_percent()
        );
        if let Some(exam) = &lesson.exam {
            let time_limit = exam
                .time_limit()
                .map(|limit| format!(", time limit {} min", limit.as_secs().div_ceil(60)))
                .unwrap_or_default();
            println!(
                "  Exam: draws {} of {} questions, pass mark {}%{time_limit}",
                exam.question_count,
                lesson.bank.len(),
                exam.pass_threshold
                    .unwrap_or(lesson.bank.passing_score_percent())
            );
        }

        let warnings = lint_lesson(&lesson);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if failed == 0 && total_warnings == 0 {
        println!("All banks valid.");
    } else if total_warnings > 0 {
        println!("\n{total_warnings} warning(s) found.");
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} bank(s) failed validation", files.len());
    }

    Ok(())
}
