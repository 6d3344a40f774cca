//! Downloadable HTML result document.
//!
//! Produces a self-contained HTML file with all CSS inlined, laid out for
//! printing: header band, learner box, score banner, question breakdown.

use fistest_core::document::{answer_preview, ResultDocument};
use fistest_core::scoring::PASS_MARK_PERCENT;
use fistest_core::traits::ResultPresenter;

use crate::{html_escape, DocumentStyle};

/// The downloadable result document presenter.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    style: DocumentStyle,
}

impl HtmlDocument {
    pub fn new(style: DocumentStyle) -> Self {
        Self { style }
    }
}

impl ResultPresenter for HtmlDocument {
    fn name(&self) -> &str {
        "html"
    }

    fn extension(&self) -> &str {
        "html"
    }

    fn render(&self, document: &ResultDocument) -> String {
        generate_html(document, &self.style)
    }
}

/// Generate the HTML document for a result.
pub fn generate_html(document: &ResultDocument, style: &DocumentStyle) -> String {
    let result = &document.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en-GB\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} | {}</title>\n",
        html_escape(&style.title),
        html_escape(&document.topic_title())
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header band
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&style.title)));
    html.push_str(&format!(
        "<p class=\"topic\">{}</p>\n",
        html_escape(&document.topic_title())
    ));
    html.push_str("</header>\n");

    // Learner box
    html.push_str("<section class=\"learner\">\n");
    html.push_str(&format!(
        "<p>Student Name: <strong>{}</strong></p>\n",
        html_escape(&document.learner_name)
    ));
    html.push_str(&format!("<p>Date: {}</p>\n", document.date_string()));
    html.push_str(&format!("<p>Time: {}</p>\n", document.time_string()));
    html.push_str(&format!(
        "<p class=\"reference\">Reference: {}</p>\n",
        document.reference
    ));
    html.push_str("</section>\n");

    // Score banner
    let (banner_class, status) = if result.passed {
        ("passed", "PASSED".to_string())
    } else {
        ("failed", format!("NOT PASSED ({PASS_MARK_PERCENT}% required)"))
    };
    html.push_str(&format!("<section class=\"banner {banner_class}\">\n"));
    html.push_str(&format!(
        "<p class=\"score\">{} / {}</p>\n",
        result.score, result.total
    ));
    html.push_str(&format!(
        "<p class=\"percentage\">{}%</p>\n",
        result.percentage
    ));
    html.push_str(&format!("<p class=\"status\">{status}</p>\n"));
    html.push_str("</section>\n");

    // Question breakdown
    html.push_str("<section class=\"breakdown\">\n");
    html.push_str("<h2>Question Breakdown</h2>\n");
    for q in &result.questions {
        let (class, icon, verdict) = if q.is_correct {
            ("correct", "✓", "Correct")
        } else {
            ("incorrect", "✗", "Incorrect")
        };
        html.push_str(&format!("<div class=\"row {class}\">\n"));
        html.push_str(&format!(
            "<p class=\"verdict\">Q{}. {icon} {verdict}</p>\n",
            q.display_number
        ));
        if !q.is_correct {
            html.push_str(&format!(
                "<p class=\"detail\">Your answer: {}</p>\n",
                html_escape(&answer_preview(&q.chosen_text, style.answer_preview_chars))
            ));
            html.push_str(&format!(
                "<p class=\"detail\">Correct: {}</p>\n",
                html_escape(&answer_preview(&q.correct_text, style.answer_preview_chars))
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    html.push_str(&format!(
        "<footer>{}</footer>\n",
        html_escape(&style.footer)
    ));
    html.push_str("</body>\n</html>");
    html
}

const CSS: &str = r#"
:root { --brand: #1f4e79; --pass: #28a745; --fail: #dc3545; --ok-row: #d4edda; --bad-row: #f8d7da; --box: #f8f9fa; --border: #c8c8c8; }
body { font-family: Helvetica, Arial, sans-serif; margin: 0 auto; max-width: 210mm; color: #000; }
header { background: var(--brand); color: #fff; text-align: center; padding: 1rem 0; }
header h1 { margin: 0; font-size: 1.6rem; }
header .topic { margin: 0.4rem 0 0; }
.learner { background: var(--box); border: 1px solid var(--border); margin: 1.5rem 1rem; padding: 0.5rem 1rem; position: relative; }
.learner p { margin: 0.3rem 0; }
.learner .reference { position: absolute; top: 0.5rem; right: 1rem; }
.banner { color: #fff; text-align: center; margin: 1rem; padding: 1rem; }
.banner.passed { background: var(--pass); }
.banner.failed { background: var(--fail); }
.banner .score { font-size: 2.2rem; font-weight: bold; margin: 0; }
.banner .percentage { font-size: 1.5rem; font-weight: bold; margin: 0.2rem 0; }
.banner .status { margin: 0; }
.breakdown { margin: 1rem; font-size: 0.8rem; }
.breakdown h2 { font-size: 1.1rem; }
.row { padding: 0.2rem 0.4rem; margin-bottom: 0.3rem; }
.row p { margin: 0.1rem 0; }
.row.correct { background: var(--ok-row); }
.row.incorrect { background: var(--bad-row); }
.row .detail { color: #646464; }
footer { text-align: center; color: #808080; font-size: 0.7rem; margin: 2rem 0 1rem; }
@media print { .row { break-inside: avoid; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn html_contains_required_fields() {
        let doc = fixtures::document();
        let html = HtmlDocument::default().render(&doc);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("LIBF FIS Test Results"));
        assert!(html.contains("Topic 2: Borrowing money"));
        assert!(html.contains("Grace &lt;Hopper&gt;"));
        assert!(html.contains("Date: 14/10/2026"));
        assert!(html.contains("Time: 09:30"));
        assert!(html.contains("Reference: 314159"));
        assert!(html.contains("1 / 3"));
        assert!(html.contains("33%"));
        assert!(html.contains("NOT PASSED (50% required)"));
        assert!(html.contains("Question Breakdown"));
        assert!(html.contains("LIBF Level 2 Certificate in Financial Education"));
    }

    #[test]
    fn breakdown_marks_each_question() {
        let doc = fixtures::document();
        let html = generate_html(&doc, &DocumentStyle::default());

        assert!(html.contains("Q1. ✓ Correct"));
        assert!(html.contains("Q2. ✗ Incorrect"));
        assert!(html.contains("Q3. ✗ Incorrect"));
        assert!(html.contains("Your answer: Interest &lt;compound&gt;"));
        assert!(html.contains("Your answer: Not answered"));
        // Correct answer for Q3 is longer than the preview and gets cut.
        assert!(html.contains("Correct: A loan taken out to buy a house, repaid ..."));
    }

    #[test]
    fn style_overrides_apply() {
        let doc = fixtures::document();
        let style = DocumentStyle {
            title: "Mock Exam".into(),
            footer: "Practice only".into(),
            answer_preview_chars: 6,
        };
        let html = generate_html(&doc, &style);
        assert!(html.contains("<h1>Mock Exam</h1>"));
        assert!(html.contains("<footer>Practice only</footer>"));
        assert!(html.contains("Correct: A loan..."));
    }

    #[test]
    fn passed_banner() {
        let mut doc = fixtures::document();
        doc.result.score = 3;
        doc.result.percentage = 100;
        doc.result.passed = true;
        let html = generate_html(&doc, &DocumentStyle::default());
        assert!(html.contains("banner passed"));
        assert!(html.contains(">PASSED<"));
    }

    #[test]
    fn write_html_file() {
        let doc = fixtures::document();
        let dir = tempfile::tempdir().unwrap();
        let path = HtmlDocument::default().write_to(&doc, dir.path()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Topic_2_Borrowing_money_314159.html"
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Question Breakdown"));
    }
}
