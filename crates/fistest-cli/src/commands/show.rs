//! The `fistest show` command.

use std::path::PathBuf;

use anyhow::Result;

use fistest_core::attempt::Attempt;
use fistest_core::parser;
use fistest_core::sections::QuestionSheet;
use fistest_report::render_sheet;

pub fn execute(test_path: PathBuf) -> Result<()> {
    let definition = parser::parse_test_definition(&test_path)?;
    let sheet = QuestionSheet::new(&definition);
    print!("{}", render_sheet(&sheet, &Attempt::new(), None));
    Ok(())
}
