//! Question sheet: the flattened, globally indexed view of a test.
//!
//! Standalone questions come first, then each case study's questions in
//! order. The position in that sequence is the global index used to record
//! and score answers; every consumer goes through [`QuestionSheet`] rather
//! than re-deriving offsets.

use std::ops::Range;

use crate::model::{CaseStudy, Question, TestDefinition};

/// One question's place on the sheet.
#[derive(Debug, Clone, Copy)]
pub struct SheetEntry<'a> {
    /// Position in the flattened sequence.
    pub index: usize,
    /// 1-based number shown to the learner.
    pub display_number: usize,
    pub question: &'a Question,
    /// Ordinal (1-based) of the owning case study, if any.
    pub case_study: Option<usize>,
}

/// A case study and the contiguous run of global indices it owns.
#[derive(Debug, Clone)]
pub struct CaseBlock<'a> {
    /// 1-based ordinal, as in "Case Study 2".
    pub ordinal: usize,
    pub case_study: &'a CaseStudy,
    pub range: Range<usize>,
}

/// Flattened question sequence for one test definition.
#[derive(Debug, Clone)]
pub struct QuestionSheet<'a> {
    definition: &'a TestDefinition,
    entries: Vec<SheetEntry<'a>>,
    blocks: Vec<CaseBlock<'a>>,
}

impl<'a> QuestionSheet<'a> {
    pub fn new(definition: &'a TestDefinition) -> Self {
        let mut entries = Vec::with_capacity(definition.question_count());
        let mut blocks = Vec::with_capacity(definition.case_studies.len());

        for question in &definition.questions {
            let index = entries.len();
            entries.push(SheetEntry {
                index,
                display_number: index + 1,
                question,
                case_study: None,
            });
        }

        for (i, case_study) in definition.case_studies.iter().enumerate() {
            let ordinal = i + 1;
            let start = entries.len();
            for question in &case_study.questions {
                let index = entries.len();
                entries.push(SheetEntry {
                    index,
                    display_number: index + 1,
                    question,
                    case_study: Some(ordinal),
                });
            }
            blocks.push(CaseBlock {
                ordinal,
                case_study,
                range: start..entries.len(),
            });
        }

        Self {
            definition,
            entries,
            blocks,
        }
    }

    pub fn definition(&self) -> &'a TestDefinition {
        self.definition
    }

    pub fn entries(&self) -> &[SheetEntry<'a>] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&SheetEntry<'a>> {
        self.entries.get(index)
    }

    pub fn question(&self, index: usize) -> Option<&'a Question> {
        self.entries.get(index).map(|e| e.question)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn display_number(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|e| e.display_number)
    }

    /// Global index for a learner-facing question number.
    pub fn index_of_display(&self, display_number: usize) -> Option<usize> {
        let index = display_number.checked_sub(1)?;
        (index < self.entries.len()).then_some(index)
    }

    /// Global indices of the standalone questions.
    pub fn standalone(&self) -> Range<usize> {
        0..self.definition.questions.len()
    }

    pub fn case_blocks(&self) -> &[CaseBlock<'a>] {
        &self.blocks
    }
}
