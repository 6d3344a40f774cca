//! TOML test definition parser.
//!
//! Loads test definitions from TOML files and directories, and lints them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CaseStudy, Question, TestDefinition};

/// Intermediate TOML structure for parsing test definition files.
#[derive(Debug, Deserialize)]
struct TomlTestFile {
    test: TomlTestHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    case_studies: Vec<TomlCaseStudy>,
}

#[derive(Debug, Deserialize)]
struct TomlTestHeader {
    topic_number: u32,
    topic_name: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlCaseStudy {
    title: String,
    #[serde(default)]
    scenario: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

fn convert_questions(raw: Vec<TomlQuestion>, section: &str) -> Result<Vec<Question>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, q)| {
            Question::new(q.prompt, q.options, q.correct, q.explanation)
                .with_context(|| format!("invalid question {} in {section}", i + 1))
        })
        .collect()
}

/// Parse a single TOML file into a `TestDefinition`.
pub fn parse_test_definition(path: &Path) -> Result<TestDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read test definition: {}", path.display()))?;

    parse_test_definition_str(&content, path)
}

/// Parse a TOML string into a `TestDefinition` (useful for testing).
pub fn parse_test_definition_str(content: &str, source_path: &Path) -> Result<TestDefinition> {
    let parsed: TomlTestFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = convert_questions(parsed.questions, "standalone questions")
        .with_context(|| source_path.display().to_string())?;

    let case_studies = parsed
        .case_studies
        .into_iter()
        .enumerate()
        .map(|(i, cs)| {
            let section = format!("case study {} ({})", i + 1, cs.title);
            Ok(CaseStudy {
                questions: convert_questions(cs.questions, &section)?,
                title: cs.title,
                scenario: cs.scenario,
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| source_path.display().to_string())?;

    Ok(TestDefinition {
        topic_number: parsed.test.topic_number,
        topic_name: parsed.test.topic_name,
        questions,
        case_studies,
    })
}

/// Recursively load all `.toml` test definitions from a directory.
pub fn load_test_directory(dir: &Path) -> Result<Vec<TestDefinition>> {
    let mut definitions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            definitions.extend(load_test_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_test_definition(&path) {
                Ok(def) => definitions.push(def),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(definitions)
}

/// A warning from test definition validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Display number of the question concerned, if any.
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Lint a test definition for content problems that still score fine.
pub fn validate_test_definition(def: &TestDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if def.question_count() == 0 {
        warnings.push(ValidationWarning {
            question: None,
            message: "test has no questions; every attempt will score 0%".into(),
        });
    }

    if def.topic_name.trim().is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "topic name is empty".into(),
        });
    }

    for (i, cs) in def.case_studies.iter().enumerate() {
        if cs.questions.is_empty() {
            warnings.push(ValidationWarning {
                question: None,
                message: format!("case study {} ({}) has no questions", i + 1, cs.title),
            });
        }
        if cs.scenario.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: None,
                message: format!("case study {} ({}) has an empty scenario", i + 1, cs.title),
            });
        }
    }

    let all_questions = def
        .questions
        .iter()
        .chain(def.case_studies.iter().flat_map(|cs| cs.questions.iter()));

    let mut seen_prompts = HashSet::new();
    for (i, q) in all_questions.enumerate() {
        let number = i + 1;

        if q.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(number),
                message: "prompt is empty".into(),
            });
        } else if !seen_prompts.insert(q.prompt().trim()) {
            warnings.push(ValidationWarning {
                question: Some(number),
                message: format!("duplicate prompt: {}", q.prompt().trim()),
            });
        }

        let mut seen_options = HashSet::new();
        for option in q.options() {
            if !seen_options.insert(option.trim()) {
                warnings.push(ValidationWarning {
                    question: Some(number),
                    message: format!("duplicate option text: {}", option.trim()),
                });
            }
        }
    }

    warnings
}
