//! Fact value checks, split into numeric and textual passes.
//!
//! Numeric facts (`ix:nonFraction`) get their value normalized from the
//! locale-formatted text the generator produced; textual facts
//! (`ix:nonNumeric`) only need presence checks. Content-pattern scanning
//! lives in the placeholder detector, not here.

use crate::diagnostics::{Issue, IssueCode, ValidationResult};
use crate::dom::{Document, Node};

/// Taxonomy-name fragments of major account lines where a zero balance is
/// legal but usually means the generator dropped a figure.
const MAJOR_ACCOUNT_MARKERS: [&str; 5] = [
    "FixedAssets",
    "CurrentAssets",
    "Turnover",
    "NetAssets",
    "ShareCapital",
];

/// Normalize a UK-formatted monetary string to a number.
///
/// Strips currency symbols and thousands separators and interprets a fully
/// parenthesized value as negative, per accounting convention. Returns
/// `None` when the remainder does not parse as a decimal number.
pub fn normalize_numeric(raw: &str) -> Option<f64> {
    let mut text = raw.trim();
    let mut negative = false;

    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        negative = true;
        text = &text[1..text.len() - 1];
    }

    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '£' | '$' | '€' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    Some(if negative { -value } else { value })
}

pub(crate) fn validate_facts(doc: &Document, out: &mut ValidationResult) {
    for node in doc.walk() {
        if node.is("nonFraction") {
            validate_numeric_fact(node, out);
        } else if node.is("nonNumeric") {
            validate_textual_fact(node, out);
        }
    }
}

fn validate_numeric_fact(node: &Node, out: &mut ValidationResult) {
    let label = fact_label(node);
    let value = node.deep_text();

    // Each required attribute is checked on its own so a single fact can
    // surface every defect at once.
    if node.attr("contextRef").is_none() {
        out.push(
            Issue::error(
                IssueCode::MissingContextRef,
                format!("numeric fact {label} has no contextRef attribute"),
            )
            .with_element(label),
        );
    }
    if node.attr("decimals").is_none() {
        out.push(
            Issue::error(
                IssueCode::MissingDecimalsAttribute,
                format!("numeric fact {label} has no decimals attribute"),
            )
            .with_element(label),
        );
    }
    if node.attr("unitRef").is_none() {
        out.push(
            Issue::error(
                IssueCode::MissingUnitRef,
                format!("numeric fact {label} has no unitRef attribute"),
            )
            .with_element(label),
        );
    }

    if value.trim().is_empty() {
        // A genuinely blank optional figure is legal, so this stays a warning.
        out.push(
            Issue::warning(
                IssueCode::EmptyNumericFact,
                format!("numeric fact {label} has no value"),
            )
            .with_element(label),
        );
        return;
    }

    match normalize_numeric(&value) {
        None => out.push(
            Issue::error(
                IssueCode::InvalidNumericValue,
                format!("numeric fact {label} value \"{}\" does not parse as a number", value.trim()),
            )
            .with_element(label),
        ),
        Some(amount) if amount == 0.0 && is_major_account(label) => out.push(
            Issue::warning(
                IssueCode::SuspiciousZeroValue,
                format!("major account line {label} is exactly zero"),
            )
            .with_element(label),
        ),
        Some(_) => {}
    }
}

fn validate_textual_fact(node: &Node, out: &mut ValidationResult) {
    let label = fact_label(node);

    if node.attr("contextRef").is_none() {
        out.push(
            Issue::error(
                IssueCode::MissingContextRef,
                format!("textual fact {label} has no contextRef attribute"),
            )
            .with_element(label),
        );
    }

    if node.deep_text().trim().is_empty() {
        out.push(
            Issue::warning(
                IssueCode::EmptyTextualFact,
                format!("textual fact {label} has no content"),
            )
            .with_element(label),
        );
    }
}

fn fact_label(node: &Node) -> &str {
    node.attr("name").unwrap_or(&node.name)
}

fn is_major_account(taxonomy_name: &str) -> bool {
    MAJOR_ACCOUNT_MARKERS
        .iter()
        .any(|marker| taxonomy_name.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn check(body: &str) -> ValidationResult {
        let doc = parse(&format!("<root>{body}</root>")).unwrap();
        let mut result = ValidationResult::new();
        validate_facts(&doc, &mut result);
        result
    }

    fn error_codes(result: &ValidationResult) -> Vec<IssueCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    fn warning_codes(result: &ValidationResult) -> Vec<IssueCode> {
        result.warnings.iter().map(|e| e.code).collect()
    }

    #[test]
    fn normalization_handles_uk_formats() {
        assert_eq!(normalize_numeric("£1,234.56"), Some(1234.56));
        assert_eq!(normalize_numeric("(1,234.56)"), Some(-1234.56));
        assert_eq!(normalize_numeric("1234.56"), Some(1234.56));
        assert_eq!(normalize_numeric("€ 2 500"), Some(2500.0));
        assert_eq!(normalize_numeric("-42"), Some(-42.0));
        assert_eq!(normalize_numeric("abc"), None);
        assert_eq!(normalize_numeric(""), None);
        assert_eq!(normalize_numeric("()"), None);
    }

    #[test]
    fn well_formed_numeric_fact_passes() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:TurnoverRevenue" contextRef="c1" unitRef="gbp" decimals="0">£52,400</ix:nonFraction>"#,
        );
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn one_fact_can_report_every_missing_attribute() {
        let result = check(r#"<ix:nonFraction name="uk-core:TurnoverRevenue">10</ix:nonFraction>"#);
        assert_eq!(
            error_codes(&result),
            vec![
                IssueCode::MissingContextRef,
                IssueCode::MissingDecimalsAttribute,
                IssueCode::MissingUnitRef
            ]
        );
    }

    #[test]
    fn empty_numeric_fact_is_a_warning() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:CreditorsDueWithinOneYear" contextRef="c1" unitRef="gbp" decimals="0"></ix:nonFraction>"#,
        );
        assert!(result.errors.is_empty());
        assert_eq!(warning_codes(&result), vec![IssueCode::EmptyNumericFact]);
    }

    #[test]
    fn unparseable_value_is_an_error() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:TurnoverRevenue" contextRef="c1" unitRef="gbp" decimals="0">n/a</ix:nonFraction>"#,
        );
        assert_eq!(error_codes(&result), vec![IssueCode::InvalidNumericValue]);
    }

    #[test]
    fn zero_on_major_account_is_suspicious() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:NetAssetsLiabilities" contextRef="c1" unitRef="gbp" decimals="0">0</ix:nonFraction>"#,
        );
        assert!(result.errors.is_empty());
        assert_eq!(warning_codes(&result), vec![IssueCode::SuspiciousZeroValue]);
    }

    #[test]
    fn zero_on_minor_line_is_fine() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:InterestPayable" contextRef="c1" unitRef="gbp" decimals="0">0</ix:nonFraction>"#,
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn textual_fact_requires_context_ref() {
        let result = check(
            r#"<ix:nonNumeric name="uk-bus:EntityCurrentLegalOrRegisteredName">Acme Ltd</ix:nonNumeric>"#,
        );
        assert_eq!(error_codes(&result), vec![IssueCode::MissingContextRef]);
    }

    #[test]
    fn empty_textual_fact_is_a_warning() {
        let result = check(
            r#"<ix:nonNumeric name="uk-bus:EntityCurrentLegalOrRegisteredName" contextRef="c1"></ix:nonNumeric>"#,
        );
        assert!(result.errors.is_empty());
        assert_eq!(warning_codes(&result), vec![IssueCode::EmptyTextualFact]);
    }

    #[test]
    fn textual_fact_content_may_be_nested() {
        let result = check(
            r#"<ix:nonNumeric name="uk-bus:EntityCurrentLegalOrRegisteredName" contextRef="c1"><b>Acme</b> Ltd</ix:nonNumeric>"#,
        );
        assert!(result.warnings.is_empty());
    }
}
