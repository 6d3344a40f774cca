//! The `fistest init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("fistest.toml").exists() {
        println!("fistest.toml already exists, skipping.");
    } else {
        std::fs::write("fistest.toml", SAMPLE_CONFIG)?;
        println!("Created fistest.toml");
    }

    std::fs::create_dir_all("test-sets")?;
    let example_path = std::path::Path::new("test-sets/example.toml");
    if example_path.exists() {
        println!("test-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TEST)?;
        println!("Created test-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: fistest validate --test test-sets/example.toml");
    println!("  2. Run: fistest show --test test-sets/example.toml");
    println!("  3. Run: fistest take --test test-sets/example.toml --name \"Your Name\" --answer 1=B");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fistest configuration

output_dir = "./fistest-results"
formats = ["html", "json"]

[document]
title = "LIBF FIS Test Results"
footer = "LIBF Level 2 Certificate in Financial Education - FIS Unit 1"
answer_preview_chars = 40
"#;

const EXAMPLE_TEST: &str = r#"[test]
topic_number = 1
topic_name = "Managing money"

[[questions]]
prompt = "What is a budget?"
options = [
    "A list of everything you have bought",
    "A plan for how income will be spent and saved",
    "A type of bank account",
]
correct = 1
explanation = "A budget plans income against spending and saving before the money is used."

[[questions]]
prompt = "Which of these is a need rather than a want?"
options = ["Rent", "A games console", "Concert tickets"]
correct = 0
explanation = "Housing is essential; the others are discretionary."

[[case_studies]]
title = "Priya's first job"
scenario = "Priya has started a part-time job paying £600 a month. She wants to save for a laptop."

[[case_studies.questions]]
prompt = "What should Priya do first?"
options = [
    "Buy the laptop on credit",
    "Work out her monthly spending",
    "Open a second current account",
]
correct = 1
explanation = "Knowing her outgoings tells her how much she can realistically save."
"#;
