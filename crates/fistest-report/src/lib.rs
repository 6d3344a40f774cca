//! fistest-report: result presenters.
//!
//! Implements the `ResultPresenter` trait for a downloadable HTML document
//! and an inline text review, and renders the question paper for an attempt
//! in progress.

use serde::{Deserialize, Serialize};

use fistest_core::document::DEFAULT_ANSWER_PREVIEW_CHARS;

pub mod html;
pub mod review;
pub mod sheet;

pub use html::HtmlDocument;
pub use review::TextReview;
pub use sheet::render_sheet;

/// Presentation settings shared by the presenters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStyle {
    /// Heading at the top of the document.
    #[serde(default = "default_title")]
    pub title: String,
    /// Line printed at the foot of the document.
    #[serde(default = "default_footer")]
    pub footer: String,
    /// Characters of answer text kept in the question breakdown.
    #[serde(default = "default_preview_chars")]
    pub answer_preview_chars: usize,
}

fn default_title() -> String {
    "LIBF FIS Test Results".to_string()
}

fn default_footer() -> String {
    "LIBF Level 2 Certificate in Financial Education - FIS Unit 1".to_string()
}

fn default_preview_chars() -> usize {
    DEFAULT_ANSWER_PREVIEW_CHARS
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            title: default_title(),
            footer: default_footer(),
            answer_preview_chars: default_preview_chars(),
        }
    }
}

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
