//! Question paper rendering.
//!
//! The paper is a pure function of the sheet and the attempt: selections
//! come from the attempt, numbering and case-study grouping from the sheet.
//! Once the attempt is scored, passing its result also marks the correct
//! option and any wrong choice on every question.

use fistest_core::attempt::Attempt;
use fistest_core::model::option_letter;
use fistest_core::scoring::{AttemptResult, QuestionOutcome};
use fistest_core::sections::{QuestionSheet, SheetEntry};

/// Render the question paper with the attempt's current selections marked.
pub fn render_sheet(
    sheet: &QuestionSheet<'_>,
    attempt: &Attempt,
    result: Option<&AttemptResult>,
) -> String {
    let definition = sheet.definition();
    let mut out = String::new();

    out.push_str(&format!("{}\n", definition.title()));
    out.push_str(&format!(
        "This test contains {} standalone questions and {} case studies.\n",
        definition.questions.len(),
        definition.case_studies.len()
    ));

    out.push_str("\nSection A: Multiple Choice Questions\n");
    for entry in &sheet.entries()[sheet.standalone()] {
        render_entry(&mut out, entry, attempt, outcome_for(result, entry));
    }

    for block in sheet.case_blocks() {
        out.push_str(&format!(
            "\nCase Study {}: {}\n",
            block.ordinal, block.case_study.title
        ));
        let scenario = block.case_study.scenario.trim();
        if !scenario.is_empty() {
            out.push_str(scenario);
            out.push('\n');
        }
        for entry in &sheet.entries()[block.range.clone()] {
            render_entry(&mut out, entry, attempt, outcome_for(result, entry));
        }
    }

    out
}

fn outcome_for<'r>(
    result: Option<&'r AttemptResult>,
    entry: &SheetEntry<'_>,
) -> Option<&'r QuestionOutcome> {
    result?.questions.get(entry.index)
}

fn render_entry(
    out: &mut String,
    entry: &SheetEntry<'_>,
    attempt: &Attempt,
    outcome: Option<&QuestionOutcome>,
) {
    let selected = attempt.answer(entry.index);
    let verdict = match outcome {
        Some(o) if o.is_correct => " ✓",
        Some(_) => " ✗",
        None => "",
    };
    out.push_str(&format!(
        "\nQ{}. {}{verdict}\n",
        entry.display_number,
        entry.question.prompt()
    ));
    for (i, option) in entry.question.options().iter().enumerate() {
        let mark = if selected == Some(i) { "x" } else { " " };
        let note = match outcome {
            Some(o) if o.correct_option == i => "  (correct answer)",
            Some(o) if o.chosen_option == Some(i) => "  (your answer)",
            _ => "",
        };
        out.push_str(&format!(
            "  [{mark}] {}. {option}{note}\n",
            option_letter(i)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use fistest_core::scoring::score_attempt;

    #[test]
    fn paper_groups_case_studies_after_section_a() {
        let def = fixtures::definition();
        let sheet = QuestionSheet::new(&def);
        let paper = render_sheet(&sheet, &Attempt::new(), None);

        assert!(paper.starts_with("Topic 2: Borrowing money\n"));
        assert!(paper.contains("This test contains 2 standalone questions and 1 case studies."));

        let section_a = paper.find("Section A: Multiple Choice Questions").unwrap();
        let q1 = paper.find("Q1. What is a surplus?").unwrap();
        let case = paper.find("Case Study 1: Omar & the bank").unwrap();
        let scenario = paper.find("Omar wants to buy his first flat.").unwrap();
        let q3 = paper.find("Q3. Which product suits Omar?").unwrap();
        assert!(section_a < q1 && q1 < case && case < scenario && scenario < q3);
        assert_eq!(paper.matches("Omar wants to buy").count(), 1);
    }

    #[test]
    fn selections_are_marked() {
        let def = fixtures::definition();
        let sheet = QuestionSheet::new(&def);
        let mut attempt = Attempt::new();
        attempt.record_answer(2, 1);
        let paper = render_sheet(&sheet, &attempt, None);

        let q3 = paper.split("Q3. ").nth(1).unwrap();
        assert!(q3.contains("  [ ] A. Spending less than you earn"));
        assert!(q3.contains("  [x] B. A loan taken out"));
        assert_eq!(paper.matches("[x]").count(), 1);
    }

    #[test]
    fn scored_paper_marks_correct_and_wrong_options() {
        let def = fixtures::definition();
        let sheet = QuestionSheet::new(&def);
        let mut attempt = Attempt::new();
        attempt.record_answer(0, 0);
        attempt.record_answer(1, 2);
        let result = score_attempt(&sheet, attempt.answers());
        let paper = render_sheet(&sheet, &attempt, Some(&result));

        let q1 = paper.split("Q1. ").nth(1).unwrap();
        let q1 = &q1[..q1.find("Q2. ").unwrap()];
        assert!(q1.starts_with("What is a surplus? ✓"));
        assert!(q1.contains("  [x] A. Spending less than you earn  (correct answer)"));
        assert!(!q1.contains("(your answer)"));

        let q2 = paper.split("Q2. ").nth(1).unwrap();
        let q2 = &q2[..q2.find("Q3. ").unwrap()];
        assert!(q2.starts_with("What is a mortgage? ✗"));
        assert!(q2.contains("  [ ] B. A loan taken out to buy a house, repaid over twenty-five years  (correct answer)"));
        assert!(q2.contains("  [x] C. Interest <compound>  (your answer)"));

        let q3 = paper.split("Q3. ").nth(1).unwrap();
        assert!(q3.starts_with("Which product suits Omar? ✗"));
        assert!(q3.contains("  [ ] B. A loan taken out"));
        assert!(q3.contains("(correct answer)"));
        assert!(!q3.contains("[x]"));
    }

    #[test]
    fn unscored_paper_has_no_verdicts() {
        let def = fixtures::definition();
        let sheet = QuestionSheet::new(&def);
        let paper = render_sheet(&sheet, &Attempt::new(), None);
        assert!(!paper.contains("(correct answer)"));
        assert!(!paper.contains('✓'));
    }
}
