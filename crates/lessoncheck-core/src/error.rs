//! Assessment error types.
//!
//! `ConfigError` covers malformed question data and is raised while a bank is
//! being built. `AssessmentError` covers calls made against an attempt or a
//! check outside their preconditions.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors in hand-authored question data, detected when a bank is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The bank has no questions.
    #[error("empty question bank")]
    EmptyBank,

    /// The pass mark is not a percentage.
    #[error("passing score {0}% is outside 0..=100")]
    PassingScoreOutOfRange(u8),

    /// A question offers fewer than two options.
    #[error("question {id} has fewer than two options")]
    TooFewOptions { id: QuestionId },

    /// The same option text appears twice in one question.
    #[error("question {id} repeats option {option:?}")]
    DuplicateOption { id: QuestionId, option: String },

    /// The correct-answer index does not point at an option.
    #[error("question {id} correctAnswer out of range ({index} with {option_count} options)")]
    AnswerOutOfRange {
        id: QuestionId,
        index: usize,
        option_count: usize,
    },

    /// Two questions share an id.
    #[error("duplicate question id {id}")]
    DuplicateId { id: QuestionId },

    /// A literal-text answer matches none of the question's options.
    #[error("question {id} correctAnswer {answer:?} matches no option")]
    UnknownLiteralAnswer { id: QuestionId, answer: String },

    /// An exam asks for no questions, or more than the bank holds.
    #[error("exam draws {requested} questions but the bank has {available}")]
    ExamSizeOutOfRange { requested: usize, available: usize },

    /// Difficulty weights are negative or all zero.
    #[error("exam difficulty mix needs non-negative weights with a positive total")]
    InvalidDifficultyMix,
}

/// Errors raised by an attempt or inline check when an operation is called
/// outside its preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The submitted option index does not exist for the question.
    #[error("invalid submission for question {question_id}: option index {index} with {option_count} options")]
    InvalidSubmission {
        question_id: QuestionId,
        index: usize,
        option_count: usize,
    },

    /// The question already has a recorded answer.
    #[error("question {question_id} has already been answered")]
    AlreadyAnswered { question_id: QuestionId },

    /// `advance` was called before the current question was answered.
    #[error("question {question_id} has not been answered")]
    NotAnswered { question_id: QuestionId },

    /// A score was requested before every question was answered.
    #[error("attempt is not completed")]
    NotCompleted,

    /// The attempt is complete, so there is no current question.
    #[error("attempt has no current question")]
    OutOfRange,
}
