//! Answer validation.

use crate::error::AssessmentError;
use crate::model::Question;

/// Check one submitted option index against a question.
///
/// An index that does not name an option is a caller bug and is rejected
/// rather than scored as wrong.
pub fn is_correct(question: &Question, submitted_index: usize) -> Result<bool, AssessmentError> {
    if submitted_index >= question.options.len() {
        return Err(AssessmentError::InvalidSubmission {
            question_id: question.id.clone(),
            index: submitted_index,
            option_count: question.options.len(),
        });
    }
    Ok(submitted_index == question.correct_answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::question;
    use crate::model::QuestionId;

    #[test]
    fn matches_correct_index_exhaustively() {
        for option_count in 2..=6 {
            for correct in 0..option_count {
                let q = question(1, option_count, correct);
                for submitted in 0..option_count {
                    let first = is_correct(&q, submitted).unwrap();
                    let second = is_correct(&q, submitted).unwrap();
                    assert_eq!(first, submitted == correct);
                    assert_eq!(first, second);
                }
            }
        }
    }

    #[test]
    fn out_of_range_submission_is_invalid() {
        let q = question(3, 2, 0);
        assert_eq!(
            is_correct(&q, 2),
            Err(AssessmentError::InvalidSubmission {
                question_id: QuestionId::Number(3),
                index: 2,
                option_count: 2,
            })
        );
        assert!(is_correct(&q, usize::MAX).is_err());
    }
}
