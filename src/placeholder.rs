//! Placeholder and anomaly detection over document text.
//!
//! Three independent checks per element: an ordered first-match-wins list
//! of template-leftover patterns, a strict date re-check for date-bearing
//! fields, and a repeated-character run scan. The first two block
//! submission; the run scan is advisory.

use crate::diagnostics::{Placeholder, Severity, ValidationResult};
use crate::dom::Document;
use crate::model::parse_iso_date;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered list of `(pattern, label)` detectors. Evaluated top to bottom;
/// the first match wins so each element yields at most one placeholder
/// finding, which keeps the list auditable pattern by pattern.
static PLACEHOLDER_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\[[^\]]+\]", "bracketed template token"),
        (r"\{+[^{}]+\}+", "brace template token"),
        (r"XXX+", "repeated placeholder characters"),
        (r"(?i)\b(TBD|PLACEHOLDER)\b", "unfinished-content marker"),
        (r"(?i)\bINSERT\s+\w+", "insert-here instruction"),
        (r"(?i)\bFILL\s+IN\b", "fill-in instruction"),
        (r"<[^>]+>", "angle-bracket template token"),
        (r"\b(EXAMPLE|SAMPLE|TEST)\b", "example content marker"),
        (r"\b(Company Name|Director Name)\b", "generic stand-in name"),
        (r"\b(DD/MM/YYYY|MM/DD/YYYY|YYYY-MM-DD)\b", "unfilled date template"),
        (r"00/00/0000|99/99/9999", "dummy date"),
    ]
    .into_iter()
    .map(|(pattern, label)| {
        // The pattern set is fixed at compile time; a failure here is a
        // programming error, not an input error.
        (Regex::new(pattern).expect("placeholder pattern must compile"), label)
    })
    .collect()
});

/// Minimum length of an identical-character run considered suspicious.
const REPEAT_RUN_LEN: usize = 5;

pub(crate) fn detect_placeholders(doc: &Document, out: &mut ValidationResult) {
    for node in doc.walk() {
        let text = node.text.trim();
        if text.is_empty() {
            continue;
        }
        let element = node.attr("name").unwrap_or(&node.name).to_string();

        if let Some(label) = first_matching_pattern(text) {
            out.placeholders.push(Placeholder {
                kind: "placeholder",
                message: format!("{label} in \"{}\"", snippet(text)),
                severity: Severity::Error,
                element: Some(element.clone()),
            });
        }

        if let Some(taxonomy_name) = node.attr("name") {
            if is_date_field(taxonomy_name) && parse_iso_date(text).is_none() {
                out.placeholders.push(Placeholder {
                    kind: "invalid_date",
                    message: format!(
                        "date field contains \"{}\", expected a YYYY-MM-DD date",
                        snippet(text)
                    ),
                    severity: Severity::Error,
                    element: Some(element.clone()),
                });
            }
        }

        if has_repeated_run(text, REPEAT_RUN_LEN) {
            out.placeholders.push(Placeholder {
                kind: "suspicious_repeat",
                message: format!(
                    "{REPEAT_RUN_LEN} or more consecutive identical characters in \"{}\"",
                    snippet(text)
                ),
                severity: Severity::Warning,
                element: Some(element),
            });
        }
    }
}

fn first_matching_pattern(text: &str) -> Option<&'static str> {
    for (pattern, label) in PLACEHOLDER_PATTERNS.iter() {
        if pattern.is_match(text) {
            return Some(label);
        }
    }
    None
}

fn is_date_field(taxonomy_name: &str) -> bool {
    taxonomy_name.contains("Date")
}

fn has_repeated_run(text: &str, min: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for ch in text.chars() {
        if Some(ch) == previous {
            run += 1;
            if run >= min && !ch.is_whitespace() {
                return true;
            }
        } else {
            previous = Some(ch);
            run = 1;
        }
    }
    false
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(60) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
