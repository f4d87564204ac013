//! lessoncheck-core: quiz and knowledge-check assessment engine.
//!
//! This crate defines the question model, bank validation, answer checking
//! and the attempt state machine that lesson pages drive, plus loaders for
//! lesson files, randomly drawn mock exams and serializable attempt records.

pub mod attempt;
pub mod bank;
pub mod check;
pub mod error;
pub mod legacy;
pub mod model;
pub mod parser;
pub mod presentation;
pub mod report;
pub mod results;
pub mod selection;
pub mod validator;

pub use attempt::{AssessmentAttempt, AttemptState, Progress};
pub use bank::{build_bank, QuestionBank};
pub use check::InlineCheck;
pub use error::{AssessmentError, ConfigError};
pub use model::{Difficulty, Question, QuestionId, DEFAULT_PASSING_SCORE_PERCENT};
pub use results::{Feedback, ScoreSummary};
pub use validator::is_correct;
