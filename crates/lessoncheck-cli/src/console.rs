//! Plain-text rendering of questions, feedback and results.

use std::sync::Arc;

use comfy_table::{Cell, Table};

use lessoncheck_core::presentation::{Presenter, QuestionView};
use lessoncheck_core::{Feedback, Question, QuestionBank, ScoreSummary};

fn render_options(out: &mut String, options: &[String]) {
    for (i, option) in options.iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", i + 1, option));
    }
}

pub fn render_question(view: &QuestionView) -> String {
    let mut out = format!("\nQuestion {}/{}\n{}\n", view.number, view.total, view.prompt);
    let options: Vec<String> = view.options.iter().map(|o| o.text.clone()).collect();
    render_options(&mut out, &options);
    out
}

pub fn render_check(question: &Question) -> String {
    let mut out = format!("\nKnowledge check\n{}\n", question.prompt);
    render_options(&mut out, &question.options);
    out
}

/// Feedback for one answer to `question`.
pub fn render_feedback(feedback: &Feedback, question: &Question) -> String {
    let mut out = if feedback.correct {
        "Correct!\n".to_string()
    } else {
        format!(
            "Incorrect. The correct answer is {}) {}\n",
            feedback.correct_index + 1,
            question.correct_option().unwrap_or_default()
        )
    };
    if !feedback.explanation.is_empty() {
        out.push_str(&feedback.explanation);
        out.push('\n');
    }
    out
}

pub fn summary_table(title: &str, summary: &ScoreSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Correct", "Score", "Pass mark", "Result"]);
    table.add_row(vec![
        Cell::new(title),
        Cell::new(format!("{}/{}", summary.correct_count, summary.total_count)),
        Cell::new(format!("{}%", summary.percent)),
        Cell::new(format!("{}%", summary.passing_score_percent)),
        Cell::new(if summary.passed { "PASS" } else { "FAIL" }),
    ]);
    table
}

/// Presenter that prints to stdout.
pub struct ConsolePresenter {
    bank: Arc<QuestionBank>,
}

impl ConsolePresenter {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self { bank }
    }
}

impl Presenter for ConsolePresenter {
    fn on_question(&mut self, view: &QuestionView) {
        print!("{}", render_question(view));
    }

    fn on_feedback(&mut self, feedback: &Feedback) {
        println!("Answer: {}", feedback.selected_index + 1);
        if let Some((_, question)) = self.bank.find(&feedback.question_id) {
            print!("{}", render_feedback(feedback, question));
        }
    }

    fn on_complete(&mut self, summary: &ScoreSummary) {
        println!("\n{}", summary_table(self.bank.title(), summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessoncheck_core::QuestionId;

    fn feedback(correct: bool) -> Feedback {
        Feedback {
            question_id: QuestionId::Number(1),
            selected_index: if correct { 1 } else { 0 },
            correct,
            correct_index: 1,
            explanation: "Regulation 643.1 covers initial verification.".into(),
        }
    }

    fn verification_question() -> Question {
        Question::new(
            1u64,
            "Which regulation covers initial verification?",
            vec!["Regulation 411.3.3".into(), "Regulation 643.1".into()],
            1,
            "Regulation 643.1 covers initial verification.",
        )
    }

    #[test]
    fn incorrect_feedback_names_the_right_option() {
        let text = render_feedback(&feedback(false), &verification_question());
        assert!(text.starts_with("Incorrect. The correct answer is 2) Regulation 643.1"));
        assert!(text.contains("covers initial verification"));
    }

    #[test]
    fn correct_feedback() {
        let text = render_feedback(&feedback(true), &verification_question());
        assert!(text.starts_with("Correct!"));
    }

    #[test]
    fn check_lists_numbered_options() {
        let q = Question::new("c1", "Pick", vec!["a".into(), "b".into()], 0, "");
        assert_eq!(render_check(&q), "\nKnowledge check\nPick\n  1) a\n  2) b\n");
    }

    #[test]
    fn summary_table_shows_result() {
        let summary = ScoreSummary::compute(2, 3, 70);
        let rendered = summary_table("Quiz", &summary).to_string();
        assert!(rendered.contains("67%"));
        assert!(rendered.contains("FAIL"));
    }
}
