//! Attempt tracker.
//!
//! Pure bookkeeping for one learner's pass through a test: the selected
//! option per global index, the learner name, and whether the attempt has
//! been submitted. It knows nothing about correctness.

use std::collections::BTreeMap;

/// Mutable state of one attempt.
///
/// Once submitted the attempt is frozen: every mutator becomes a no-op and
/// reports that nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attempt {
    learner_name: String,
    answers: BTreeMap<usize, usize>,
    submitted: bool,
}

impl Attempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selected option for a question, replacing any earlier choice.
    ///
    /// Returns `false` if the attempt is already submitted.
    pub fn record_answer(&mut self, index: usize, option: usize) -> bool {
        if self.submitted {
            return false;
        }
        self.answers.insert(index, option);
        true
    }

    /// Store the learner name, trimmed. Returns `false` once submitted.
    pub fn set_learner_name(&mut self, name: &str) -> bool {
        if self.submitted {
            return false;
        }
        self.learner_name = name.trim().to_string();
        true
    }

    pub fn learner_name(&self) -> &str {
        &self.learner_name
    }

    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Flip the attempt to submitted. Only the session calls this, after the
    /// submission checks pass.
    pub(crate) fn freeze(&mut self) {
        self.submitted = true;
    }
}
