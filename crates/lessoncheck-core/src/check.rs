//! Inline knowledge checks.
//!
//! An inline check is a single unscored question placed in the body of a
//! lesson. The learner answers once and sees the explanation; nothing is
//! counted toward the section quiz.

use crate::bank::validate_question;
use crate::error::{AssessmentError, ConfigError};
use crate::model::Question;
use crate::results::Feedback;
use crate::validator::is_correct;

#[derive(Debug, Clone)]
pub struct InlineCheck {
    question: Question,
    feedback: Option<Feedback>,
}

impl InlineCheck {
    /// Wrap a question, applying the same option and answer rules as a bank.
    pub fn new(question: Question) -> Result<Self, ConfigError> {
        validate_question(&question)?;
        Ok(Self {
            question,
            feedback: None,
        })
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Answer the check. Only the first valid submission is accepted.
    pub fn submit(&mut self, selected_index: usize) -> Result<Feedback, AssessmentError> {
        if self.feedback.is_some() {
            return Err(AssessmentError::AlreadyAnswered {
                question_id: self.question.id.clone(),
            });
        }

        let correct = is_correct(&self.question, selected_index)?;
        let feedback = Feedback {
            question_id: self.question.id.clone(),
            selected_index,
            correct,
            correct_index: self.question.correct_answer,
            explanation: self.question.explanation.clone(),
        };
        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// Feedback from the accepted submission, if any.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_answered(&self) -> bool {
        self.feedback.is_some()
    }

    /// Clear the answer so the check can be tried again.
    pub fn reset(&mut self) {
        self.feedback = None;
    }
}
