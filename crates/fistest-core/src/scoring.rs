//! Attempt scoring.
//!
//! One mark per question, no partial credit. The percentage is rounded half
//! away from zero using integer arithmetic so results are reproducible
//! byte for byte.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sections::QuestionSheet;

/// Percentage at or above which an attempt passes.
pub const PASS_MARK_PERCENT: u32 = 50;

/// Text recorded for a question the learner left blank.
pub const NOT_ANSWERED: &str = "Not answered";

/// Verdict for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub display_number: usize,
    pub prompt: String,
    /// Chosen option index, `None` when unanswered.
    pub chosen_option: Option<usize>,
    /// Chosen option text or [`NOT_ANSWERED`].
    pub chosen_text: String,
    pub correct_option: usize,
    pub correct_text: String,
    pub is_correct: bool,
    /// Explanation text, empty when the question has none.
    #[serde(default)]
    pub explanation: String,
    /// Ordinal of the owning case study.
    #[serde(default)]
    pub case_study: Option<usize>,
}

/// The scored output of one completed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// One entry per question, in sheet order.
    pub questions: Vec<QuestionOutcome>,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub passed: bool,
}

impl AttemptResult {
    pub fn incorrect(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.questions.iter().filter(|q| !q.is_correct)
    }

    pub fn unanswered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.chosen_option.is_none())
            .count()
    }
}

/// `round(100 * score / total)`, half away from zero. An empty test scores 0.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    ((200 * score + total) / (2 * total)) as u32
}

pub fn is_pass(percentage: u32) -> bool {
    percentage >= PASS_MARK_PERCENT
}

/// Score recorded answers against the sheet.
///
/// Answers keyed past the end of the sheet are ignored, and an option index
/// the question does not have is scored as unanswered.
pub fn score_attempt(sheet: &QuestionSheet<'_>, answers: &BTreeMap<usize, usize>) -> AttemptResult {
    let questions: Vec<QuestionOutcome> = sheet
        .entries()
        .iter()
        .map(|entry| {
            let q = entry.question;
            // An option the question does not have is treated as no answer.
            let chosen = answers
                .get(&entry.index)
                .copied()
                .filter(|&option| q.option(option).is_some());
            let chosen_text = chosen
                .and_then(|option| q.option(option))
                .unwrap_or(NOT_ANSWERED)
                .to_string();
            QuestionOutcome {
                display_number: entry.display_number,
                prompt: q.prompt().to_string(),
                chosen_option: chosen,
                chosen_text,
                correct_option: q.correct(),
                correct_text: q.correct_text().to_string(),
                is_correct: chosen == Some(q.correct()),
                explanation: q.explanation().unwrap_or_default().to_string(),
                case_study: entry.case_study,
            }
        })
        .collect();

    let score = questions.iter().filter(|q| q.is_correct).count() as u32;
    let total = questions.len() as u32;
    let percentage = percentage(score, total);

    AttemptResult {
        questions,
        score,
        total,
        percentage,
        passed: is_pass(percentage),
    }
}
