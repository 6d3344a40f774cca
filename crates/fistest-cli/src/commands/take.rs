//! The `fistest take` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use fistest_core::document::ResultDocument;
use fistest_core::model::parse_option_letter;
use fistest_core::parser;
use fistest_core::scoring::PASS_MARK_PERCENT;
use fistest_core::session::{SubmitOutcome, TestSession};
use fistest_core::submission::incomplete_prompt;
use fistest_core::traits::ResultPresenter;
use fistest_report::{render_sheet, HtmlDocument, TextReview};

use crate::config::load_config_from;

pub struct TakeArgs {
    pub test: PathBuf,
    pub name: Option<String>,
    pub answers: Vec<String>,
    pub answers_file: Option<PathBuf>,
    pub require_complete: bool,
    pub paper: bool,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub config: Option<PathBuf>,
}

/// Answers supplied from a TOML file.
#[derive(Debug, Default, Deserialize)]
struct AnswerSheet {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

fn load_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse answers file: {}", path.display()))
}

/// Parse a question number and option letter pair into (display number, option index).
fn parse_answer(question: &str, letter: &str) -> Result<(usize, usize)> {
    let number = question
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("invalid question number: '{}'", question.trim()))?;
    let option = parse_option_letter(letter)
        .ok_or_else(|| anyhow::anyhow!("invalid option letter for question {number}: '{letter}'"))?;
    Ok((number, option))
}

fn parse_answer_arg(arg: &str) -> Result<(usize, usize)> {
    let (question, letter) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("answer must look like QUESTION=LETTER, got '{arg}'"))?;
    parse_answer(question, letter)
}

fn collect_answers(args: &TakeArgs, sheet: &AnswerSheet) -> Result<BTreeMap<usize, usize>> {
    let mut answers = BTreeMap::new();
    for (question, letter) in &sheet.answers {
        let (number, option) = parse_answer(question, letter)?;
        answers.insert(number, option);
    }
    // Command-line answers win over the file.
    for arg in &args.answers {
        let (number, option) = parse_answer_arg(arg)?;
        answers.insert(number, option);
    }
    Ok(answers)
}

fn resolve_formats(format: Option<&str>, configured: &[String]) -> Vec<String> {
    let requested: Vec<String> = match format {
        Some(f) => f.split(',').map(|s| s.trim().to_string()).collect(),
        None => configured.to_vec(),
    };
    if requested.iter().any(|f| f == "all") {
        return vec!["html".to_string(), "json".to_string(), "text".to_string()];
    }
    requested
}

pub fn execute(args: TakeArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let definition = parser::parse_test_definition(&args.test)?;

    let answer_sheet = match &args.answers_file {
        Some(path) => load_answer_sheet(path)?,
        None => AnswerSheet::default(),
    };
    let answers = collect_answers(&args, &answer_sheet)?;
    let name = args
        .name
        .clone()
        .or_else(|| answer_sheet.name.clone())
        .unwrap_or_default();

    let mut session = TestSession::new(&definition);
    session.set_learner_name(&name);
    for (&number, &option) in &answers {
        session.record_answer_by_number(number, option)?;
    }

    eprintln!(
        "fistest v{} | {} | {}/{} answered",
        env!("CARGO_PKG_VERSION"),
        definition.title(),
        session.attempt().answered_count(),
        session.sheet().len()
    );

    let require_complete = args.require_complete;
    let outcome = session.try_submit_with(|unanswered| {
        eprintln!("{}", incomplete_prompt(unanswered));
        if require_complete {
            eprintln!("Not submitting (--require-complete).");
        }
        !require_complete
    })?;
    if let SubmitOutcome::Cancelled { unanswered } = outcome {
        anyhow::bail!("submission cancelled: {unanswered} question(s) unanswered");
    }

    let document = session
        .document()
        .context("attempt was submitted but no result document was produced")?;

    if args.paper {
        print!(
            "{}",
            render_sheet(session.sheet(), session.attempt(), Some(&document.result))
        );
        println!();
    }
    print!("{}", TextReview.render(document));
    print_summary(document);

    let output_dir = args.output.clone().unwrap_or_else(|| config.output_dir.clone());
    let html = HtmlDocument::new(config.document.clone());

    for fmt in resolve_formats(args.format.as_deref(), &config.formats) {
        match fmt.as_str() {
            "html" => {
                let path = html.write_to(document, &output_dir)?;
                eprintln!("HTML document: {}", path.display());
            }
            "json" => {
                let path = output_dir.join(document.file_name("json"));
                document.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "text" => {
                let path = TextReview.write_to(document, &output_dir)?;
                eprintln!("Text review: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(document: &ResultDocument) {
    use comfy_table::{Cell, Table};

    let result = &document.result;
    let mut table = Table::new();
    table.set_header(vec![
        "Learner",
        "Reference",
        "Score",
        "Percentage",
        "Unanswered",
        "Result",
    ]);
    table.add_row(vec![
        Cell::new(&document.learner_name),
        Cell::new(document.reference),
        Cell::new(format!("{}/{}", result.score, result.total)),
        Cell::new(format!("{}%", result.percentage)),
        Cell::new(result.unanswered_count()),
        Cell::new(if result.passed {
            "PASSED".to_string()
        } else {
            format!("NOT PASSED ({PASS_MARK_PERCENT}% required)")
        }),
    ]);

    eprintln!("\n{table}");
}
