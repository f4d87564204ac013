//! Assessment attempt state machine.
//!
//! One [`AssessmentAttempt`] tracks a learner's way through a shared
//! [`QuestionBank`]. The only valid path to a score is `submit_answer` then
//! `advance`, once per question, then `score`. Every other ordering is
//! rejected with an [`AssessmentError`] and leaves the attempt untouched, so
//! the reported score always matches what was answered.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::error::AssessmentError;
use crate::model::{Question, QuestionId};
use crate::results::{Feedback, Response, ScoreSummary};
use crate::validator::is_correct;

/// Where an attempt is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    InProgress,
    Completed,
}

/// Outcome of a successful [`AssessmentAttempt::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The cursor moved to the question at `index`.
    NextQuestion { index: usize },
    /// The last question was passed; the attempt is now complete.
    Completed(ScoreSummary),
}

/// A single learner's attempt at a question bank.
#[derive(Debug, Clone)]
pub struct AssessmentAttempt {
    id: Uuid,
    bank: Arc<QuestionBank>,
    responses: Vec<Response>,
    current_index: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl AssessmentAttempt {
    /// Start a fresh attempt at the first question.
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bank,
            responses: Vec::new(),
            current_index: 0,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Set once the last question has been advanced past.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Cursor into the bank; equals the bank length once complete.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> AttemptState {
        if self.current_index == self.bank.len() {
            AttemptState::Completed
        } else {
            AttemptState::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == AttemptState::Completed
    }

    /// Recorded answers in the order they were given.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    pub fn response_for(&self, id: &QuestionId) -> Option<&Response> {
        self.responses.iter().find(|r| &r.question_id == id)
    }

    /// The question awaiting an answer or an advance.
    pub fn current_question(&self) -> Result<&Question, AssessmentError> {
        self.bank
            .get(self.current_index)
            .ok_or(AssessmentError::OutOfRange)
    }

    /// Record an answer for the current question.
    ///
    /// The cursor does not move; call [`advance`](Self::advance) once the
    /// feedback has been shown. A question can be answered only once.
    pub fn submit_answer(&mut self, selected_index: usize) -> Result<Feedback, AssessmentError> {
        let question = self.current_question()?;

        if self.response_for(&question.id).is_some() {
            return Err(AssessmentError::AlreadyAnswered {
                question_id: question.id.clone(),
            });
        }

        let correct = is_correct(question, selected_index)?;
        let feedback = Feedback {
            question_id: question.id.clone(),
            selected_index,
            correct,
            correct_index: question.correct_answer,
            explanation: question.explanation.clone(),
        };

        tracing::debug!(
            attempt = %self.id,
            question = %feedback.question_id,
            selected_index,
            correct,
            "answer submitted"
        );

        self.responses.push(Response {
            question_id: feedback.question_id.clone(),
            selected_index,
            correct,
        });

        Ok(feedback)
    }

    /// Move past the current, already answered question.
    pub fn advance(&mut self) -> Result<Progress, AssessmentError> {
        let question = self.current_question()?;
        if self.response_for(&question.id).is_none() {
            return Err(AssessmentError::NotAnswered {
                question_id: question.id.clone(),
            });
        }

        self.current_index += 1;

        if self.current_index < self.bank.len() {
            tracing::debug!(attempt = %self.id, index = self.current_index, "advanced");
            return Ok(Progress::NextQuestion {
                index: self.current_index,
            });
        }

        self.completed_at = Some(Utc::now());
        let summary = self.score()?;
        tracing::debug!(
            attempt = %self.id,
            percent = summary.percent,
            passed = summary.passed,
            "attempt completed"
        );
        Ok(Progress::Completed(summary))
    }

    /// Final score. Only available once the attempt is complete.
    pub fn score(&self) -> Result<ScoreSummary, AssessmentError> {
        if !self.is_completed() {
            return Err(AssessmentError::NotCompleted);
        }

        // Completion implies one response per question, so counting
        // correct responses covers the whole bank.
        let correct_count = self.responses.iter().filter(|r| r.correct).count();

        Ok(ScoreSummary::compute(
            correct_count,
            self.bank.len(),
            self.bank.passing_score_percent(),
        ))
    }

    /// A fresh attempt at the same bank.
    pub fn reset(&self) -> AssessmentAttempt {
        AssessmentAttempt::new(Arc::clone(&self.bank))
    }
}
