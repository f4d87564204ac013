//! Adapter for question data written in older shapes.
//!
//! Lesson content marks the right answer inconsistently: most quizzes use a
//! numeric `correctAnswer`, inline checks use `correctIndex`, and a few banks
//! give the literal option text instead of an index. [`RawQuestion`] accepts
//! all of these and [`RawQuestion::resolve`] turns them into the canonical
//! index-based [`Question`].
//!
//! Literal answers are matched byte for byte against the option list. An
//! option that has been edited since the answer was written no longer
//! matches and the load fails, instead of scoring against the wrong option.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Difficulty, Question, QuestionId};

/// How a source file names the correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Index(usize),
    Literal(String),
}

/// A question as written in a lesson file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    pub id: QuestionId,
    #[serde(alias = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(
        alias = "correctAnswer",
        alias = "correct_index",
        alias = "correctIndex"
    )]
    pub correct_answer: AnswerKey,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl RawQuestion {
    /// Whether the answer is given as option text rather than an index.
    pub fn uses_literal_answer(&self) -> bool {
        matches!(self.correct_answer, AnswerKey::Literal(_))
    }

    /// Convert to the canonical index-based form.
    ///
    /// Only the literal lookup can fail here; range and option checks are
    /// left to [`build_bank`](crate::bank::build_bank).
    pub fn resolve(self) -> Result<Question, ConfigError> {
        let correct_answer = match &self.correct_answer {
            AnswerKey::Index(index) => *index,
            AnswerKey::Literal(answer) => self
                .options
                .iter()
                .position(|option| option == answer)
                .ok_or_else(|| ConfigError::UnknownLiteralAnswer {
                    id: self.id.clone(),
                    answer: answer.clone(),
                })?,
        };

        Ok(Question {
            id: self.id,
            prompt: self.prompt,
            options: self.options,
            correct_answer,
            explanation: self.explanation,
            section: self.section,
            difficulty: self.difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_index_under_any_key() {
        for key in ["correct_answer", "correctAnswer", "correct_index", "correctIndex"] {
            let json = format!(
                r#"{{"id": 1, "question": "Q", "options": ["a", "b", "c"], "{key}": 2}}"#
            );
            let raw: RawQuestion = serde_json::from_str(&json).unwrap();
            assert!(!raw.uses_literal_answer());
            assert_eq!(raw.resolve().unwrap().correct_answer, 2);
        }
    }

    #[test]
    fn literal_answer_resolves_to_its_position() {
        let raw: RawQuestion = serde_json::from_str(
            r#"{
                "id": 4,
                "question": "What is the typical annual efficiency loss?",
                "options": ["1%", "2.5%", "3.5%", "5%"],
                "correctAnswer": "3.5%",
                "explanation": "Roughly 3.5% a year."
            }"#,
        )
        .unwrap();
        assert!(raw.uses_literal_answer());
        let q = raw.resolve().unwrap();
        assert_eq!(q.correct_answer, 2);
        assert_eq!(q.correct_option(), Some("3.5%"));
    }

    #[test]
    fn section_and_difficulty_are_carried_over() {
        let raw: RawQuestion = serde_json::from_str(
            r#"{"id": 12, "question": "Q", "options": ["a", "b"], "correctAnswer": 0,
                "section": "Module 2", "difficulty": "advanced", "topic": "Flow Measurement"}"#,
        )
        .unwrap();
        let q = raw.resolve().unwrap();
        assert_eq!(q.section.as_deref(), Some("Module 2"));
        assert_eq!(q.difficulty, Some(Difficulty::Advanced));
    }

    #[test]
    fn edited_option_text_is_not_matched_loosely() {
        let raw = RawQuestion {
            id: QuestionId::from("sil"),
            prompt: "What does SIL stand for?".into(),
            options: vec![
                "Safety integrity level".into(),
                "System isolation limit".into(),
            ],
            correct_answer: AnswerKey::Literal("Safety Integrity Level".into()),
            explanation: String::new(),
            section: None,
            difficulty: None,
        };
        assert_eq!(
            raw.resolve().unwrap_err(),
            ConfigError::UnknownLiteralAnswer {
                id: QuestionId::from("sil"),
                answer: "Safety Integrity Level".into(),
            }
        );
    }

    #[test]
    fn out_of_range_index_passes_through_for_bank_validation() {
        let raw: RawQuestion =
            serde_json::from_str(r#"{"id": 1, "prompt": "Q", "options": ["a", "b"], "correctAnswer": 5}"#)
                .unwrap();
        assert_eq!(raw.resolve().unwrap().correct_answer, 5);
    }
}
