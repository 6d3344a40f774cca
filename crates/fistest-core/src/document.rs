//! Result documents with JSON persistence.
//!
//! A [`ResultDocument`] is the finalized hand-off to presenters: the scored
//! result plus the learner, the topic, and a freshly generated reference and
//! timestamp. It is produced once per submitted attempt.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::TestDefinition;
use crate::scoring::AttemptResult;

/// Characters of answer text kept in the per-question breakdown.
pub const DEFAULT_ANSWER_PREVIEW_CHARS: usize = 40;

/// Six-digit document reference, 100000–999999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Reference(u32);

impl Reference {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn generate() -> Self {
        Self(rand::thread_rng().gen_range(Self::MIN..=Self::MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Reference {
    type Error = String;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Reference::new(value).ok_or_else(|| format!("reference {value} is not six digits"))
    }
}

impl From<Reference> for u32 {
    fn from(r: Reference) -> Self {
        r.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and time assigned to a document when it is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStamp {
    pub id: Uuid,
    pub reference: Reference,
    pub generated_at: DateTime<Utc>,
}

impl DocumentStamp {
    pub fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: Reference::generate(),
            generated_at: Utc::now(),
        }
    }
}

/// Where a session gets stamps for the documents it generates.
pub trait StampSource {
    fn next_stamp(&mut self) -> DocumentStamp;
}

/// Random reference, new v4 id, current time.
pub struct SystemStamps;

impl StampSource for SystemStamps {
    fn next_stamp(&mut self) -> DocumentStamp {
        DocumentStamp::fresh()
    }
}

/// Always hands out the same stamp.
pub struct FixedStamp(pub DocumentStamp);

impl StampSource for FixedStamp {
    fn next_stamp(&mut self) -> DocumentStamp {
        self.0
    }
}

/// A complete result document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDocument {
    /// Unique document identifier.
    pub id: Uuid,
    /// Six-digit reference printed on the document and used in its file name.
    pub reference: Reference,
    /// When the document was generated.
    pub generated_at: DateTime<Utc>,
    pub topic_number: u32,
    pub topic_name: String,
    pub learner_name: String,
    pub result: AttemptResult,
}

impl ResultDocument {
    pub fn new(
        definition: &TestDefinition,
        learner_name: &str,
        result: AttemptResult,
        stamp: DocumentStamp,
    ) -> Self {
        Self {
            id: stamp.id,
            reference: stamp.reference,
            generated_at: stamp.generated_at,
            topic_number: definition.topic_number,
            topic_name: definition.topic_name.clone(),
            learner_name: learner_name.to_string(),
            result,
        }
    }

    pub fn topic_title(&self) -> String {
        format!("Topic {}: {}", self.topic_number, self.topic_name)
    }

    /// `dd/mm/yyyy`
    pub fn date_string(&self) -> String {
        self.generated_at.format("%d/%m/%Y").to_string()
    }

    /// `HH:MM`
    pub fn time_string(&self) -> String {
        self.generated_at.format("%H:%M").to_string()
    }

    /// File name for this document, e.g. `Topic_3_Borrowing_money_482913.html`.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "Topic_{}_{}_{}.{}",
            self.topic_number,
            fill_whitespace(&self.topic_name),
            self.reference,
            extension
        )
    }

    /// Save the document as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize document")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write document to {}", path.display()))?;
        Ok(())
    }

    /// Load a document from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document from {}", path.display()))?;
        let document: ResultDocument =
            serde_json::from_str(&content).context("failed to parse document JSON")?;
        Ok(document)
    }
}

/// Replace each run of whitespace (and any path separator) with `_`.
fn fill_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Bounded prefix of answer text for compact breakdowns.
///
/// Cuts on a character boundary and appends `...` only when something was
/// dropped.
pub fn answer_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
