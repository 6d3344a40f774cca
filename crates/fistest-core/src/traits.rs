//! Presenter trait.
//!
//! Implemented by the `fistest-report` crate. A presenter receives a
//! finished [`ResultDocument`] and turns it into something a learner can
//! read; it never scores anything itself.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::ResultDocument;

/// Renders a finalized result document.
pub trait ResultPresenter {
    /// Human-readable presenter name (e.g. "html").
    fn name(&self) -> &str;

    /// File extension for written output, without the dot.
    fn extension(&self) -> &str;

    /// Render the document to a string.
    fn render(&self, document: &ResultDocument) -> String;

    /// Render and write the document into `dir`, named by
    /// [`ResultDocument::file_name`]. Returns the written path.
    fn write_to(&self, document: &ResultDocument, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let path = dir.join(document.file_name(self.extension()));
        std::fs::write(&path, self.render(document))
            .with_context(|| format!("failed to write {} output to {}", self.name(), path.display()))?;
        tracing::debug!(presenter = self.name(), path = %path.display(), "document written");
        Ok(path)
    }
}
