//! Test session: one learner's attempt at one test definition.
//!
//! The session owns the question sheet and the attempt, gates submission,
//! and produces the result document exactly once. After submission every
//! mutator is a no-op and every submit call returns the same document.

use crate::attempt::Attempt;
use crate::document::{ResultDocument, StampSource, SystemStamps};
use crate::error::{AnswerError, SubmissionBlocked};
use crate::model::TestDefinition;
use crate::scoring::{score_attempt, AttemptResult};
use crate::sections::QuestionSheet;
use crate::submission::{check_readiness, incomplete_prompt, Readiness};

/// Whether a mutation took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// The attempt is submitted; nothing changed.
    Frozen,
}

/// First phase of a submission.
pub enum SubmitStep<'s, 'a> {
    /// A hard precondition failed; nothing changed.
    Blocked(SubmissionBlocked),
    /// Some questions are unanswered. Resolve with
    /// [`PendingSubmission::confirm`] or [`PendingSubmission::cancel`].
    NeedsConfirmation(PendingSubmission<'s, 'a>),
    /// Submitted and scored just now.
    Submitted(&'s ResultDocument),
    /// Submitted earlier; this is the original document.
    AlreadySubmitted(&'s ResultDocument),
}

/// A submission waiting on the learner's "submit anyway?" decision.
///
/// Holds the session's exclusive borrow, so no other mutation can happen
/// until it is confirmed or cancelled.
pub struct PendingSubmission<'s, 'a> {
    session: &'s mut TestSession<'a>,
    unanswered: usize,
}

impl<'s, 'a> PendingSubmission<'s, 'a> {
    pub fn unanswered(&self) -> usize {
        self.unanswered
    }

    /// The question to put to the learner.
    pub fn prompt(&self) -> String {
        incomplete_prompt(self.unanswered)
    }

    /// Submit anyway.
    pub fn confirm(self) -> &'s ResultDocument {
        let session = self.session;
        session.finalize()
    }

    /// Back out. The session is left exactly as it was.
    pub fn cancel(self) {
        tracing::debug!(unanswered = self.unanswered, "submission cancelled");
    }
}

/// Result of a one-shot submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    AlreadySubmitted,
    Cancelled { unanswered: usize },
}

/// One attempt at one test.
pub struct TestSession<'a> {
    sheet: QuestionSheet<'a>,
    attempt: Attempt,
    document: Option<ResultDocument>,
    stamps: Box<dyn StampSource + 'a>,
}

impl<'a> TestSession<'a> {
    pub fn new(definition: &'a TestDefinition) -> Self {
        Self::with_stamps(definition, SystemStamps)
    }

    pub fn with_stamps(definition: &'a TestDefinition, stamps: impl StampSource + 'a) -> Self {
        tracing::debug!(
            topic = definition.topic_number,
            questions = definition.question_count(),
            "session started"
        );
        Self {
            sheet: QuestionSheet::new(definition),
            attempt: Attempt::new(),
            document: None,
            stamps: Box::new(stamps),
        }
    }

    pub fn sheet(&self) -> &QuestionSheet<'a> {
        &self.sheet
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn is_submitted(&self) -> bool {
        self.attempt.is_submitted()
    }

    pub fn readiness(&self) -> Readiness {
        check_readiness(&self.attempt, self.sheet.len())
    }

    /// Select `option` for the question at global `index`.
    pub fn record_answer(
        &mut self,
        index: usize,
        option: usize,
    ) -> Result<RecordOutcome, AnswerError> {
        if self.attempt.is_submitted() {
            tracing::debug!(index, option, "answer ignored, attempt submitted");
            return Ok(RecordOutcome::Frozen);
        }
        let entry = self
            .sheet
            .entry(index)
            .ok_or(AnswerError::QuestionOutOfRange {
                index,
                total: self.sheet.len(),
            })?;
        let count = entry.question.options().len();
        if option >= count {
            return Err(AnswerError::OptionOutOfRange {
                display_number: entry.display_number,
                option,
                count,
            });
        }
        self.attempt.record_answer(index, option);
        tracing::debug!(index, option, "answer recorded");
        Ok(RecordOutcome::Recorded)
    }

    /// Select an option by the learner-facing question number.
    pub fn record_answer_by_number(
        &mut self,
        display_number: usize,
        option: usize,
    ) -> Result<RecordOutcome, AnswerError> {
        let index = self
            .sheet
            .index_of_display(display_number)
            .ok_or(AnswerError::QuestionOutOfRange {
                index: display_number.saturating_sub(1),
                total: self.sheet.len(),
            })?;
        self.record_answer(index, option)
    }

    pub fn set_learner_name(&mut self, name: &str) -> RecordOutcome {
        if self.attempt.set_learner_name(name) {
            RecordOutcome::Recorded
        } else {
            RecordOutcome::Frozen
        }
    }

    /// Start a submission.
    pub fn begin_submit(&mut self) -> SubmitStep<'_, 'a> {
        match self.readiness() {
            Readiness::AlreadySubmitted => {
                tracing::debug!("submit ignored, attempt already submitted");
                SubmitStep::AlreadySubmitted(self.finalize())
            }
            Readiness::Blocked(reason) => {
                tracing::warn!(%reason, "submission blocked");
                SubmitStep::Blocked(reason)
            }
            Readiness::Incomplete { unanswered } => {
                SubmitStep::NeedsConfirmation(PendingSubmission {
                    session: self,
                    unanswered,
                })
            }
            Readiness::Complete => SubmitStep::Submitted(self.finalize()),
        }
    }

    /// Submit, asking `confirm` whether to proceed when questions are unanswered.
    pub fn try_submit_with<F>(&mut self, confirm: F) -> Result<SubmitOutcome, SubmissionBlocked>
    where
        F: FnOnce(usize) -> bool,
    {
        match self.begin_submit() {
            SubmitStep::Blocked(reason) => Err(reason),
            SubmitStep::Submitted(_) => Ok(SubmitOutcome::Submitted),
            SubmitStep::AlreadySubmitted(_) => Ok(SubmitOutcome::AlreadySubmitted),
            SubmitStep::NeedsConfirmation(pending) => {
                let unanswered = pending.unanswered();
                if confirm(unanswered) {
                    pending.confirm();
                    Ok(SubmitOutcome::Submitted)
                } else {
                    pending.cancel();
                    Ok(SubmitOutcome::Cancelled { unanswered })
                }
            }
        }
    }

    /// Submit, proceeding past the unanswered-questions warning.
    pub fn try_submit(&mut self) -> Result<SubmitOutcome, SubmissionBlocked> {
        self.try_submit_with(|_| true)
    }

    pub fn result(&self) -> Option<&AttemptResult> {
        self.document.as_ref().map(|d| &d.result)
    }

    pub fn document(&self) -> Option<&ResultDocument> {
        self.document.as_ref()
    }

    /// Freeze, score, and stamp the attempt. Runs at most once; later calls
    /// return the stored document.
    fn finalize(&mut self) -> &ResultDocument {
        let Self {
            sheet,
            attempt,
            document,
            stamps,
        } = self;
        document.get_or_insert_with(|| {
            attempt.freeze();
            let result = score_attempt(sheet, attempt.answers());
            let stamp = stamps.next_stamp();
            tracing::info!(
                learner = attempt.learner_name(),
                score = result.score,
                total = result.total,
                percentage = result.percentage,
                passed = result.passed,
                reference = %stamp.reference,
                "attempt submitted"
            );
            ResultDocument::new(sheet.definition(), attempt.learner_name(), result, stamp)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentStamp, FixedStamp, Reference};
    use crate::model::{CaseStudy, Question};
    use chrono::Utc;
    use std::cell::Cell;
    use std::rc::Rc;
    use uuid::Uuid;

    fn question(prompt: &str, correct: usize) -> Question {
        Question::new(
            prompt,
            vec!["zero".into(), "one".into(), "two".into()],
            correct,
            None,
        )
        .unwrap()
    }

    fn definition() -> TestDefinition {
        TestDefinition {
            topic_number: 1,
            topic_name: "Money".into(),
            questions: vec![question("s1", 0), question("s2", 1)],
            case_studies: vec![CaseStudy {
                title: "Rui".into(),
                scenario: "Rui gets paid.".into(),
                questions: vec![question("c1", 2)],
            }],
        }
    }

    fn fixed() -> FixedStamp {
        FixedStamp(DocumentStamp {
            id: Uuid::nil(),
            reference: Reference::new(654_321).unwrap(),
            generated_at: Utc::now(),
        })
    }

    /// Counts how many stamps were taken, i.e. how many documents were made.
    struct CountingStamps(Rc<Cell<u32>>);

    impl StampSource for CountingStamps {
        fn next_stamp(&mut self) -> DocumentStamp {
            self.0.set(self.0.get() + 1);
            DocumentStamp::fresh()
        }
    }

    #[test]
    fn out_of_range_answers_are_rejected() {
        let def = definition();
        let mut session = TestSession::with_stamps(&def, fixed());
        assert_eq!(
            session.record_answer(3, 0),
            Err(AnswerError::QuestionOutOfRange { index: 3, total: 3 })
        );
        assert_eq!(
            session.record_answer(2, 3),
            Err(AnswerError::OptionOutOfRange {
                display_number: 3,
                option: 3,
                count: 3
            })
        );
        assert_eq!(session.attempt().answered_count(), 0);
    }

    #[test]
    fn missing_name_blocks_without_state_change() {
        let def = definition();
        let mut session = TestSession::with_stamps(&def, fixed());
        session.record_answer(0, 0).unwrap();
        let before = session.attempt().clone();

        assert_eq!(
            session.try_submit(),
            Err(SubmissionBlocked::MissingLearnerName)
        );
        assert_eq!(session.attempt(), &before);
        assert!(session.document().is_none());
    }

    #[test]
    fn cancelling_the_warning_leaves_the_attempt_open() {
        let def = definition();
        let mut session = TestSession::with_stamps(&def, fixed());
        session.set_learner_name("Noor");
        session.record_answer(0, 0).unwrap();
        let before = session.attempt().clone();

        let outcome = session.try_submit_with(|unanswered| {
            assert_eq!(unanswered, 2);
            false
        });
        assert_eq!(outcome, Ok(SubmitOutcome::Cancelled { unanswered: 2 }));
        assert_eq!(session.attempt(), &before);
        assert!(!session.is_submitted());

        // Still editable after a cancel.
        assert_eq!(session.record_answer(1, 1), Ok(RecordOutcome::Recorded));
    }

    #[test]
    fn two_phase_confirm_submits() {
        let def = definition();
        let mut session = TestSession::with_stamps(&def, fixed());
        session.set_learner_name("Noor");
        session.record_answer(0, 0).unwrap();

        let doc = match session.begin_submit() {
            SubmitStep::NeedsConfirmation(pending) => {
                assert_eq!(pending.unanswered(), 2);
                assert!(pending.prompt().contains("2 unanswered"));
                pending.confirm().clone()
            }
            _ => panic!("expected a confirmation step"),
        };
        assert_eq!(doc.result.score, 1);
        assert_eq!(doc.learner_name, "Noor");
        assert!(session.is_submitted());
    }

    #[test]
    fn scenario_scores_two_of_three() {
        let def = definition();
        let mut session = TestSession::with_stamps(&def, fixed());
        session.set_learner_name("  Noor  ");
        session.record_answer(0, 0).unwrap();
        session.record_answer(1, 1).unwrap();
        session.record_answer(2, 0).unwrap();

        assert_eq!(session.try_submit(), Ok(SubmitOutcome::Submitted));
        let result = session.result().unwrap();
        assert_eq!((result.score, result.total), (2, 3));
        assert_eq!(result.percentage, 67);
        assert!(result.passed);
        assert_eq!(session.document().unwrap().learner_name, "Noor");
        assert_eq!(session.document().unwrap().reference.value(), 654_321);
    }

    #[test]
    fn submitted_session_is_frozen() {
        let def = definition();
        let count = Rc::new(Cell::new(0));
        let mut session = TestSession::with_stamps(&def, CountingStamps(Rc::clone(&count)));
        session.set_learner_name("Noor");
        session.record_answer(0, 0).unwrap();
        session.record_answer(1, 0).unwrap();
        session.record_answer(2, 2).unwrap();
        session.try_submit().unwrap();

        let attempt_before = session.attempt().clone();
        let doc_before = session.document().unwrap().clone();

        assert_eq!(session.record_answer(1, 1), Ok(RecordOutcome::Frozen));
        assert_eq!(session.record_answer(99, 99), Ok(RecordOutcome::Frozen));
        assert_eq!(session.set_learner_name("Other"), RecordOutcome::Frozen);
        assert_eq!(session.try_submit(), Ok(SubmitOutcome::AlreadySubmitted));
        assert!(matches!(
            session.begin_submit(),
            SubmitStep::AlreadySubmitted(_)
        ));

        assert_eq!(session.attempt(), &attempt_before);
        assert_eq!(session.document().unwrap(), &doc_before);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn empty_test_submits_at_zero_percent() {
        let def = TestDefinition {
            topic_number: 7,
            topic_name: "Empty".into(),
            questions: vec![],
            case_studies: vec![],
        };
        let mut session = TestSession::with_stamps(&def, fixed());
        session.set_learner_name("Noor");
        assert_eq!(session.try_submit(), Ok(SubmitOutcome::Submitted));
        let result = session.result().unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 0);
        assert!(!result.passed);
    }

    #[test]
    fn answers_by_display_number() {
        let def = definition();
        let mut session = TestSession::with_stamps(&def, fixed());
        session.record_answer_by_number(3, 2).unwrap();
        assert_eq!(session.attempt().answer(2), Some(2));
        assert!(matches!(
            session.record_answer_by_number(0, 0),
            Err(AnswerError::QuestionOutOfRange { .. })
        ));
    }
}
