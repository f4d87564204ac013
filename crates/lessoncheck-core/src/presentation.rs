//! Render-ready views of an attempt and the presenter seam.
//!
//! The state machine never renders anything. A host asks for a
//! [`QuestionView`] and reacts to [`Presenter`] callbacks; everything a UI
//! needs to draw options, highlight correctness and show explanations is
//! derived here.

use serde::Serialize;

use crate::attempt::{AssessmentAttempt, Progress};
use crate::error::AssessmentError;
use crate::model::QuestionId;
use crate::results::{Feedback, ScoreSummary};

/// How an option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionState {
    /// Not yet answered, or neither picked nor correct.
    Idle,
    SelectedCorrect,
    SelectedIncorrect,
    /// The right answer, revealed after a wrong pick.
    RevealedCorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
    pub state: OptionState,
}

/// Snapshot of the current question for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based position for display.
    pub number: usize,
    pub total: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub options: Vec<OptionView>,
    /// Present once the question has been answered.
    pub explanation: Option<String>,
    /// Whether "next" should be enabled.
    pub can_advance: bool,
}

impl AssessmentAttempt {
    /// View of the current question, or `None` once the attempt is complete.
    pub fn view(&self) -> Option<QuestionView> {
        let question = self.current_question().ok()?;
        let response = self.response_for(&question.id);

        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let state = match response {
                    None => OptionState::Idle,
                    Some(r) if r.selected_index == index && r.correct => {
                        OptionState::SelectedCorrect
                    }
                    Some(r) if r.selected_index == index => OptionState::SelectedIncorrect,
                    Some(_) if index == question.correct_answer => OptionState::RevealedCorrect,
                    Some(_) => OptionState::Idle,
                };
                OptionView {
                    index,
                    text: text.clone(),
                    state,
                }
            })
            .collect();

        Some(QuestionView {
            number: self.current_index() + 1,
            total: self.bank().len(),
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            options,
            explanation: response.map(|_| question.explanation.clone()),
            can_advance: response.is_some(),
        })
    }
}

/// Receives attempt events as they happen.
pub trait Presenter {
    fn on_question(&mut self, view: &QuestionView);
    fn on_feedback(&mut self, feedback: &Feedback);
    fn on_complete(&mut self, summary: &ScoreSummary);
}

/// Presenter that ignores every event.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn on_question(&mut self, _: &QuestionView) {}
    fn on_feedback(&mut self, _: &Feedback) {}
    fn on_complete(&mut self, _: &ScoreSummary) {}
}

/// Play a scripted list of option indices through an attempt.
///
/// Each answer is submitted and then advanced past. Fails with the first
/// error the attempt reports, or with `NotCompleted` if the script runs out
/// before the last question.
pub fn drive(
    attempt: &mut AssessmentAttempt,
    answers: &[usize],
    presenter: &mut dyn Presenter,
) -> Result<ScoreSummary, AssessmentError> {
    for &answer in answers {
        if let Some(view) = attempt.view() {
            presenter.on_question(&view);
        }
        let feedback = attempt.submit_answer(answer)?;
        presenter.on_feedback(&feedback);

        if let Progress::Completed(summary) = attempt.advance()? {
            presenter.on_complete(&summary);
            return Ok(summary);
        }
    }
    Err(AssessmentError::NotCompleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::build_bank;
    use crate::bank::tests::question;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        questions: Vec<usize>,
        feedback: Vec<bool>,
        summary: Option<ScoreSummary>,
    }

    impl Presenter for Recorder {
        fn on_question(&mut self, view: &QuestionView) {
            self.questions.push(view.number);
        }
        fn on_feedback(&mut self, feedback: &Feedback) {
            self.feedback.push(feedback.correct);
        }
        fn on_complete(&mut self, summary: &ScoreSummary) {
            self.summary = Some(*summary);
        }
    }

    fn attempt() -> AssessmentAttempt {
        let bank = build_bank("Quiz", vec![question(1, 3, 2), question(2, 2, 0)], None).unwrap();
        AssessmentAttempt::new(Arc::new(bank))
    }

    #[test]
    fn view_before_answer_hides_explanation() {
        let attempt = attempt();
        let view = attempt.view().unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 2);
        assert!(view.explanation.is_none());
        assert!(!view.can_advance);
        assert!(view.options.iter().all(|o| o.state == OptionState::Idle));
    }

    #[test]
    fn view_after_wrong_answer_reveals_correct_option() {
        let mut attempt = attempt();
        attempt.submit_answer(0).unwrap();
        let view = attempt.view().unwrap();
        let states: Vec<_> = view.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            vec![
                OptionState::SelectedIncorrect,
                OptionState::Idle,
                OptionState::RevealedCorrect
            ]
        );
        assert_eq!(view.explanation.as_deref(), Some("Option 2 is right."));
        assert!(view.can_advance);
    }

    #[test]
    fn view_is_none_when_completed() {
        let mut attempt = attempt();
        drive(&mut attempt, &[2, 0], &mut NoopPresenter).unwrap();
        assert!(attempt.view().is_none());
    }

    #[test]
    fn drive_reports_every_event() {
        let mut attempt = attempt();
        let mut recorder = Recorder::default();
        let summary = drive(&mut attempt, &[2, 1], &mut recorder).unwrap();

        assert_eq!(recorder.questions, vec![1, 2]);
        assert_eq!(recorder.feedback, vec![true, false]);
        assert_eq!(recorder.summary, Some(summary));
        assert_eq!(summary.percent, 50);
        assert!(!summary.passed);
    }

    #[test]
    fn drive_with_short_script_is_not_completed() {
        let mut attempt = attempt();
        assert_eq!(
            drive(&mut attempt, &[2], &mut NoopPresenter),
            Err(AssessmentError::NotCompleted)
        );
        assert_eq!(attempt.current_index(), 1);
    }

    #[test]
    fn drive_stops_on_invalid_answer() {
        let mut attempt = attempt();
        assert!(matches!(
            drive(&mut attempt, &[7, 0], &mut NoopPresenter),
            Err(AssessmentError::InvalidSubmission { index: 7, .. })
        ));
    }
}
