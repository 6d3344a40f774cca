//! Inline result review.
//!
//! Plain-text rendering of a result for the terminal: the summary banner
//! followed by every question with the learner's answer, the correct answer
//! when it differs, and the explanation when there is one.

use fistest_core::document::ResultDocument;
use fistest_core::scoring::PASS_MARK_PERCENT;
use fistest_core::traits::ResultPresenter;

/// Inline review presenter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReview;

impl ResultPresenter for TextReview {
    fn name(&self) -> &str {
        "text"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn render(&self, document: &ResultDocument) -> String {
        generate_review(document)
    }
}

pub fn generate_review(document: &ResultDocument) -> String {
    let result = &document.result;
    let mut out = String::new();

    out.push_str(&format!(
        "{} | {} | Reference {}\n\n",
        document.topic_title(),
        document.learner_name,
        document.reference
    ));

    let (heading, status) = if result.passed {
        ("Well Done!", "You have passed this test!".to_string())
    } else {
        (
            "Keep Practicing!",
            format!("You need {PASS_MARK_PERCENT}% to pass. Review the topics and try again."),
        )
    };
    out.push_str(&format!("{heading}\n"));
    out.push_str(&format!("{}/{}  {}%\n", result.score, result.total, result.percentage));
    out.push_str(&format!("{status}\n"));

    out.push_str("\nQuestion Review\n");
    for q in &result.questions {
        let mark = if q.is_correct { "correct" } else { "wrong" };
        out.push_str(&format!("\nQ{}. {}\n", q.display_number, q.prompt));
        out.push_str(&format!("  Your answer: {} [{mark}]\n", q.chosen_text));
        if !q.is_correct {
            out.push_str(&format!("  Correct answer: {}\n", q.correct_text));
        }
        if !q.explanation.is_empty() {
            out.push_str(&format!("  {}\n", q.explanation));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn failing_review_has_encouragement() {
        let text = generate_review(&fixtures::document());
        assert!(text.starts_with("Topic 2: Borrowing money | Grace <Hopper> | Reference 314159"));
        assert!(text.contains("Keep Practicing!"));
        assert!(text.contains("1/3  33%"));
        assert!(text.contains("You need 50% to pass."));
    }

    #[test]
    fn correct_answer_only_shown_when_wrong() {
        let text = generate_review(&fixtures::document());
        let q1 = text.split("\nQ1. ").nth(1).unwrap().split("\nQ2. ").next().unwrap();
        assert!(q1.contains("Your answer: Spending less than you earn [correct]"));
        assert!(!q1.contains("Correct answer:"));
        assert!(q1.contains("Income exceeds spending."));

        let q2 = text.split("\nQ2. ").nth(1).unwrap().split("\nQ3. ").next().unwrap();
        assert!(q2.contains("Your answer: Interest <compound> [wrong]"));
        assert!(q2.contains("Correct answer: A loan taken out to buy a house"));

        let q3 = text.split("\nQ3. ").nth(1).unwrap();
        assert!(q3.contains("Your answer: Not answered [wrong]"));
        assert!(q3.contains("Mortgages fund homes."));
    }

    #[test]
    fn passing_review() {
        let mut doc = fixtures::document();
        doc.result.passed = true;
        doc.result.percentage = 67;
        doc.result.score = 2;
        let text = TextReview.render(&doc);
        assert!(text.contains("Well Done!"));
        assert!(text.contains("You have passed this test!"));
    }
}
