pub mod grade;
pub mod init;
pub mod take;
pub mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use lessoncheck_core::parser::Lesson;
use lessoncheck_core::selection::{exam_rng, filter_bank};
use lessoncheck_core::{Difficulty, QuestionBank};

/// Options choosing which questions an attempt runs.
#[derive(Debug, Clone, Default, Args)]
pub struct BankFilter {
    /// Only questions from this section (e.g. "1.2")
    #[arg(long)]
    pub section: Option<String>,

    /// Only questions of this difficulty: basic, intermediate, advanced
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Seed for drawing mock exam questions
    #[arg(long)]
    pub seed: Option<u64>,
}

impl BankFilter {
    fn is_filtering(&self) -> bool {
        self.section.is_some() || self.difficulty.is_some()
    }
}

/// Pick the bank for one attempt.
///
/// Filters narrow the whole quiz. Without filters, exam lessons draw a fresh
/// exam and other lessons run every question. Returns whether a draw happened.
pub fn attempt_bank(lesson: &Lesson, filter: &BankFilter) -> Result<(Arc<QuestionBank>, bool)> {
    if filter.is_filtering() {
        let bank = filter_bank(&lesson.bank, filter.section.as_deref(), filter.difficulty)
            .context("no questions match the section/difficulty filter")?;
        return Ok((Arc::new(bank), false));
    }

    let mut rng = exam_rng(filter.seed);
    let bank = lesson.attempt_bank(&mut rng)?;
    if lesson.exam.is_some() {
        tracing::info!(
            "drew {} of {} questions for '{}'",
            bank.len(),
            lesson.bank.len(),
            bank.title()
        );
    }
    Ok((bank, lesson.exam.is_some()))
}
