//! Derived statistics and the human-readable report renderer.

use crate::diagnostics::{Severity, ValidationResult};
use crate::dom::Document;
use crate::structural::TAXONOMY_PREFIX;
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

/// Counts derived from the parsed tree and the elapsed validation time.
/// Computed once at the end of a run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Elements whose `name` attribute carries a namespace separator.
    pub facts: usize,
    /// Facts tagged with the expected taxonomy-publisher prefix.
    pub tagged_elements: usize,
    pub contexts: usize,
    pub units: usize,
    /// Namespace declarations on the root element.
    pub namespaces: usize,
    pub duration_ms: u64,
}

impl Stats {
    pub fn collect(doc: &Document, elapsed: Duration) -> Self {
        let mut facts = 0;
        let mut tagged_elements = 0;
        let mut contexts = 0;
        let mut units = 0;

        for node in doc.walk() {
            if let Some(name) = node.attr("name") {
                if name.contains(':') {
                    facts += 1;
                    if name.starts_with(TAXONOMY_PREFIX) {
                        tagged_elements += 1;
                    }
                }
            }
            if node.is("context") {
                contexts += 1;
            } else if node.is("unit") {
                units += 1;
            }
        }

        let namespaces = doc
            .root
            .attributes
            .iter()
            .filter(|(key, _)| *key == "xmlns" || key.starts_with("xmlns:"))
            .count();

        Self {
            facts,
            tagged_elements,
            contexts,
            units,
            namespaces,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Render a validation result as a multi-section text report.
///
/// A pure projection for operator-facing logs and UI; gating decisions
/// must use [`ValidationResult::is_valid`], never this string.
pub fn render(result: &ValidationResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(58);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, " FILING VALIDATION REPORT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Status: {}",
        if result.is_valid { "VALID" } else { "INVALID" }
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Statistics");
    let _ = writeln!(out, "----------");
    let _ = writeln!(out, "  Facts:            {}", result.stats.facts);
    let _ = writeln!(out, "  Tagged elements:  {}", result.stats.tagged_elements);
    let _ = writeln!(out, "  Contexts:         {}", result.stats.contexts);
    let _ = writeln!(out, "  Units:            {}", result.stats.units);
    let _ = writeln!(out, "  Namespaces:       {}", result.stats.namespaces);
    let _ = writeln!(out, "  Validation time:  {} ms", result.stats.duration_ms);

    if !result.errors.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Errors ({})", result.errors.len());
        let _ = writeln!(out, "----------");
        for error in &result.errors {
            let _ = writeln!(out, "  {error}");
        }
    }

    let blocking: Vec<_> = result
        .placeholders
        .iter()
        .filter(|p| p.severity == Severity::Error)
        .collect();
    if !blocking.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Critical placeholders ({})", blocking.len());
        let _ = writeln!(out, "----------");
        for placeholder in blocking {
            let _ = writeln!(out, "  {placeholder}");
        }
    }

    let advisory: Vec<_> = result
        .placeholders
        .iter()
        .filter(|p| p.severity == Severity::Warning)
        .collect();
    if !result.warnings.is_empty() || !advisory.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings ({})", result.warnings.len() + advisory.len());
        let _ = writeln!(out, "----------");
        for warning in &result.warnings {
            let _ = writeln!(out, "  {warning}");
        }
        for placeholder in advisory {
            let _ = writeln!(out, "  {placeholder}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Conclusion");
    let _ = writeln!(out, "----------");
    if result.is_valid {
        let _ = writeln!(
            out,
            "  The document passed all validation checks and is ready for submission."
        );
    } else {
        let blocking_count = result
            .placeholders
            .iter()
            .filter(|p| p.severity == Severity::Error)
            .count();
        let _ = writeln!(
            out,
            "  The document is not ready for submission: {} error(s) and {} unresolved placeholder(s) must be fixed.",
            result.errors.len(),
            blocking_count
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Issue, IssueCode, Placeholder};
    use crate::parser::parse;

    #[test]
    fn stats_count_tagged_and_untagged_facts() {
        let doc = parse(
            r#"<html xmlns:ix="a" xmlns:xbrli="b">
                 <xbrli:context id="c1"/>
                 <xbrli:unit id="u1"/>
                 <span name="uk-core:TurnoverRevenue">1</span>
                 <span name="dei:DocumentType">10-K</span>
                 <span name="plain">x</span>
               </html>"#,
        )
        .unwrap();
        let stats = Stats::collect(&doc, Duration::from_millis(7));
        assert_eq!(stats.facts, 2);
        assert_eq!(stats.tagged_elements, 1);
        assert_eq!(stats.contexts, 1);
        assert_eq!(stats.units, 1);
        assert_eq!(stats.namespaces, 2);
        assert_eq!(stats.duration_ms, 7);
    }

    #[test]
    fn report_sections_reflect_the_result() {
        let mut result = ValidationResult::new();
        result.push(Issue::error(IssueCode::MissingNamespace, "ns missing"));
        result.push(Issue::warning(IssueCode::EmptyNumericFact, "blank figure"));
        result.placeholders.push(Placeholder {
            kind: "placeholder",
            message: "leftover".into(),
            severity: Severity::Error,
            element: None,
        });
        result.finalize();

        let report = render(&result);
        assert!(report.contains("Status: INVALID"));
        assert!(report.contains("Errors (1)"));
        assert!(report.contains("MISSING_NAMESPACE"));
        assert!(report.contains("Critical placeholders (1)"));
        assert!(report.contains("Warnings (1)"));
        assert!(report.contains("not ready for submission"));
    }

    #[test]
    fn valid_report_has_no_error_sections() {
        let mut result = ValidationResult::new();
        result.finalize();
        let report = render(&result);
        assert!(report.contains("Status: VALID"));
        assert!(!report.contains("Errors ("));
        assert!(report.contains("ready for submission"));
    }

    #[test]
    fn render_is_deterministic_and_pure() {
        let mut result = ValidationResult::new();
        result.push(Issue::error(IssueCode::MissingSchemaRef, "x"));
        result.finalize();
        let before = result.clone();
        assert_eq!(render(&result), render(&result));
        assert_eq!(result, before);
    }
}
