//! Validated question banks.
//!
//! Question data is hand-authored, so every rule is checked eagerly in
//! [`build_bank`]. A [`QuestionBank`] that exists is always well formed and
//! never changes afterwards.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ConfigError;
use crate::model::{Question, QuestionId, DEFAULT_PASSING_SCORE_PERCENT};

/// An immutable, validated sequence of questions with a pass mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    title: String,
    questions: Vec<Question>,
    passing_score_percent: u8,
}

impl QuestionBank {
    /// Display label for the whole assessment.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Questions in attempt order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Pass mark as a whole percentage.
    pub fn passing_score_percent(&self) -> u8 {
        self.passing_score_percent
    }

    /// Number of questions. Never zero.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Banks from [`build_bank`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`, in attempt order.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Look up a question and its position by id.
    pub fn find(&self, id: &QuestionId) -> Option<(usize, &Question)> {
        self.questions.iter().enumerate().find(|(_, q)| &q.id == id)
    }
}

/// Build a bank from caller-supplied questions.
///
/// Rules are checked in order: non-empty bank, pass mark within `0..=100`,
/// then per question at least two distinct options, an in-range correct
/// answer and an id not used earlier in the bank. The first violation is
/// returned.
pub fn build_bank(
    title: impl Into<String>,
    questions: Vec<Question>,
    passing_score_percent: Option<u8>,
) -> Result<QuestionBank, ConfigError> {
    let title = title.into();

    if questions.is_empty() {
        return Err(ConfigError::EmptyBank);
    }

    let passing_score_percent = passing_score_percent.unwrap_or(DEFAULT_PASSING_SCORE_PERCENT);
    if passing_score_percent > 100 {
        return Err(ConfigError::PassingScoreOutOfRange(passing_score_percent));
    }

    let mut seen_ids = HashSet::new();
    for question in &questions {
        validate_question(question)?;
        if !seen_ids.insert(&question.id) {
            return Err(ConfigError::DuplicateId {
                id: question.id.clone(),
            });
        }
    }

    tracing::debug!(
        title = %title,
        questions = questions.len(),
        passing_score_percent,
        "built question bank"
    );

    Ok(QuestionBank {
        title,
        questions,
        passing_score_percent,
    })
}

/// Check the rules that apply to a single question on its own.
pub fn validate_question(question: &Question) -> Result<(), ConfigError> {
    if question.options.len() < 2 {
        return Err(ConfigError::TooFewOptions {
            id: question.id.clone(),
        });
    }

    let mut seen = HashSet::new();
    for option in &question.options {
        if !seen.insert(option.as_str()) {
            return Err(ConfigError::DuplicateOption {
                id: question.id.clone(),
                option: option.clone(),
            });
        }
    }

    if question.correct_answer >= question.options.len() {
        return Err(ConfigError::AnswerOutOfRange {
            id: question.id.clone(),
            index: question.correct_answer,
            option_count: question.options.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn question(id: u64, option_count: usize, correct: usize) -> Question {
        Question::new(
            id,
            format!("Question {id}?"),
            (0..option_count).map(|i| format!("Option {i}")).collect(),
            correct,
            format!("Option {correct} is right."),
        )
    }

    #[test]
    fn builds_with_default_pass_mark() {
        let bank = build_bank("Quiz", vec![question(1, 4, 0), question(2, 2, 1)], None).unwrap();
        assert_eq!(bank.title(), "Quiz");
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.passing_score_percent(), 70);
        assert_eq!(bank.find(&QuestionId::Number(2)).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn empty_bank_is_rejected() {
        let err = build_bank("Quiz", vec![], None).unwrap_err();
        assert_eq!(err, ConfigError::EmptyBank);
        assert_eq!(err.to_string(), "empty question bank");
    }

    #[test]
    fn out_of_range_answer_is_rejected_not_clamped() {
        let err = build_bank("Quiz", vec![question(1, 4, 5)], None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::AnswerOutOfRange {
                id: QuestionId::Number(1),
                index: 5,
                option_count: 4,
            }
        );

        // Exactly one past the end is also out of range.
        assert!(matches!(
            build_bank("Quiz", vec![question(1, 4, 4)], None),
            Err(ConfigError::AnswerOutOfRange { .. })
        ));
    }

    #[test]
    fn single_option_is_rejected() {
        let err = build_bank("Quiz", vec![question(7, 1, 0)], None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooFewOptions {
                id: QuestionId::Number(7)
            }
        );
    }

    #[test]
    fn repeated_options_are_rejected() {
        let mut q = question(1, 3, 0);
        q.options[2] = q.options[0].clone();
        assert!(matches!(
            build_bank("Quiz", vec![q], None),
            Err(ConfigError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = build_bank("Quiz", vec![question(1, 2, 0), question(1, 3, 2)], None).unwrap_err();
        assert_eq!(err.to_string(), "duplicate question id 1");
    }

    #[test]
    fn pass_mark_bounds() {
        assert!(build_bank("Quiz", vec![question(1, 2, 0)], Some(0)).is_ok());
        assert!(build_bank("Quiz", vec![question(1, 2, 0)], Some(100)).is_ok());
        assert_eq!(
            build_bank("Quiz", vec![question(1, 2, 0)], Some(101)).unwrap_err(),
            ConfigError::PassingScoreOutOfRange(101)
        );
    }

    #[test]
    fn first_violation_wins() {
        // Question 2 is invalid before the duplicate id on question 3 is seen.
        let err = build_bank(
            "Quiz",
            vec![question(1, 2, 0), question(2, 2, 9), question(1, 2, 0)],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::AnswerOutOfRange { .. }));
    }
}
