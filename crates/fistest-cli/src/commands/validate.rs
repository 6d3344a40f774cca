//! The `fistest validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(test_path: PathBuf) -> Result<()> {
    let definitions = if test_path.is_dir() {
        fistest_core::parser::load_test_directory(&test_path)?
    } else {
        vec![fistest_core::parser::parse_test_definition(&test_path)?]
    };

    let mut total_warnings = 0;

    for def in &definitions {
        println!("Test: {def}");

        let warnings = fistest_core::parser::validate_test_definition(def);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All test definitions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
