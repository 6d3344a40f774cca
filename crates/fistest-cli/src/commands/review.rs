//! The `fistest review` command.

use std::path::PathBuf;

use anyhow::Result;

use fistest_core::document::ResultDocument;
use fistest_core::traits::ResultPresenter;
use fistest_report::TextReview;

pub fn execute(document_path: PathBuf) -> Result<()> {
    let document = ResultDocument::load_json(&document_path)?;
    print!("{}", TextReview.render(&document));
    Ok(())
}
