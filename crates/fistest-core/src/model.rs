//! Test definition types.
//!
//! A test is a topic with a list of standalone multiple-choice questions and
//! an ordered list of case studies, each carrying its own scenario and
//! questions. These values are authored outside the engine and are never
//! mutated by it.

use std::fmt;

use crate::error::DefinitionError;

/// Highest number of options a question may carry (one per letter A–Z).
pub const MAX_OPTIONS: usize = 26;

/// A single multiple-choice item.
///
/// Every `Question` that exists has at least two options and a correct-option
/// index that points at one of them; the only way to build one is
/// [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    explanation: Option<String>,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
        explanation: Option<String>,
    ) -> Result<Self, DefinitionError> {
        let prompt = prompt.into();
        let count = options.len();
        if count < 2 {
            return Err(DefinitionError::TooFewOptions { prompt, count });
        }
        if count > MAX_OPTIONS {
            return Err(DefinitionError::TooManyOptions {
                prompt,
                count,
                max: MAX_OPTIONS,
            });
        }
        if correct >= count {
            return Err(DefinitionError::CorrectOptionOutOfRange {
                prompt,
                correct,
                count,
            });
        }
        Ok(Self {
            prompt,
            options,
            correct,
            explanation: explanation.filter(|e| !e.trim().is_empty()),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Index of the correct option.
    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn correct_text(&self) -> &str {
        &self.options[self.correct]
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

/// A named group of questions that share one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStudy {
    pub title: String,
    /// Scenario text shown once before the group's questions.
    pub scenario: String,
    pub questions: Vec<Question>,
}

/// A complete test for one course topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDefinition {
    pub topic_number: u32,
    pub topic_name: String,
    /// Standalone questions, shown before any case study.
    pub questions: Vec<Question>,
    pub case_studies: Vec<CaseStudy>,
}

impl TestDefinition {
    /// Number of questions once standalone and case-study questions are combined.
    pub fn question_count(&self) -> usize {
        self.questions.len()
            + self
                .case_studies
                .iter()
                .map(|cs| cs.questions.len())
                .sum::<usize>()
    }

    /// Heading used on papers and documents, e.g. `Topic 3: Borrowing`.
    pub fn title(&self) -> String {
        format!("Topic {}: {}", self.topic_number, self.topic_name)
    }
}

impl fmt::Display for TestDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} questions, {} case studies)",
            self.title(),
            self.question_count(),
            self.case_studies.len()
        )
    }
}

/// Display letter for an option index (`0` → `A`).
pub fn option_letter(index: usize) -> char {
    debug_assert!(index < MAX_OPTIONS);
    char::from(b'A' + (index % MAX_OPTIONS) as u8)
}

/// Parse an option letter (case-insensitive) back to its index.
pub fn parse_option_letter(s: &str) -> Option<usize> {
    let mut chars = s.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    Some((c as u8 - b'A') as usize)
}
