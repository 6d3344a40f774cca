//! Submission readiness checks.
//!
//! A missing learner name blocks submission outright. Unanswered questions
//! only raise a warning the learner may override.

use crate::attempt::Attempt;
use crate::error::SubmissionBlocked;

/// Where an attempt stands with respect to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Already submitted; nothing further happens.
    AlreadySubmitted,
    /// A hard precondition failed.
    Blocked(SubmissionBlocked),
    /// Submittable, but the learner should confirm first.
    Incomplete { unanswered: usize },
    /// Every question answered.
    Complete,
}

pub fn check_readiness(attempt: &Attempt, total: usize) -> Readiness {
    if attempt.is_submitted() {
        return Readiness::AlreadySubmitted;
    }
    if attempt.learner_name().trim().is_empty() {
        return Readiness::Blocked(SubmissionBlocked::MissingLearnerName);
    }
    let answered = attempt.answers().keys().filter(|&&i| i < total).count();
    if answered < total {
        Readiness::Incomplete {
            unanswered: total - answered,
        }
    } else {
        Readiness::Complete
    }
}

/// Prompt shown when a learner submits with gaps.
pub fn incomplete_prompt(unanswered: usize) -> String {
    format!("You have {unanswered} unanswered question(s). Do you want to submit anyway?")
}
