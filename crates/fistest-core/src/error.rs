//! Engine error types.
//!
//! These are the typed failures the assessment engine can report. Callers
//! match on them to decide whether to re-prompt the learner or reject
//! authored content; nothing here is fatal to a running session.

use thiserror::Error;

/// A question that violates the multiple-choice invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Fewer than two options were supplied.
    #[error("question \"{prompt}\" has {count} option(s), at least 2 are required")]
    TooFewOptions { prompt: String, count: usize },

    /// More options than there are option letters.
    #[error("question \"{prompt}\" has {count} options, at most {max} can be lettered")]
    TooManyOptions {
        prompt: String,
        count: usize,
        max: usize,
    },

    /// The correct-option index does not point at an option.
    #[error("question \"{prompt}\" marks option {correct} as correct but only has {count} options")]
    CorrectOptionOutOfRange {
        prompt: String,
        correct: usize,
        count: usize,
    },
}

/// An answer that cannot be addressed to the question sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    /// The global index is past the end of the sheet.
    #[error("question index {index} is out of range (test has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    /// The option index is past the end of the question's options.
    #[error("option {option} is out of range for question {display_number} ({count} options)")]
    OptionOutOfRange {
        display_number: usize,
        option: usize,
        count: usize,
    },
}

/// Hard precondition failures that stop a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionBlocked {
    /// The learner name is empty after trimming.
    #[error("Please enter your name before submitting.")]
    MissingLearnerName,
}
