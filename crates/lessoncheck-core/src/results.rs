//! Values handed back to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Immediate result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub question_id: QuestionId,
    /// The option the learner picked.
    pub selected_index: usize,
    pub correct: bool,
    /// The option that should be highlighted as right.
    pub correct_index: usize,
    pub explanation: String,
}

/// A recorded answer within an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub selected_index: usize,
    pub correct: bool,
}

/// Final result of a completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub total_count: usize,
    /// Whole percentage, rounded half up.
    pub percent: u8,
    pub passed: bool,
    /// The pass mark `percent` was compared against.
    pub passing_score_percent: u8,
}

impl ScoreSummary {
    /// Score `correct_count` out of `total_count` against a pass mark.
    pub fn compute(correct_count: usize, total_count: usize, passing_score_percent: u8) -> Self {
        let percent = rounded_percent(correct_count, total_count);
        Self {
            correct_count,
            total_count,
            percent,
            passed: percent >= passing_score_percent,
            passing_score_percent,
        }
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(7, 8), 88);
        assert_eq!(rounded_percent(0, 5), 0);
        assert_eq!(rounded_percent(5, 5), 100);
    }

    #[test]
    fn pass_mark_is_inclusive() {
        assert!(ScoreSummary::compute(7, 10, 70).passed);
        assert!(!ScoreSummary::compute(2, 3, 70).passed);
        assert!(ScoreSummary::compute(0, 4, 0).passed);
    }
}
