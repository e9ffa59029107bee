//! Root-level structure checks: namespace declarations and the taxonomy
//! schema reference in the document header.

use crate::diagnostics::{Issue, IssueCode, ValidationResult};
use crate::dom::Document;

/// Namespace prefixes every filing must declare on its root element,
/// with the exact URI each must carry.
pub const REQUIRED_NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:ix", "http://www.xbrl.org/2013/inlineXBRL"),
    ("xmlns:xbrli", "http://www.xbrl.org/2003/instance"),
    ("xmlns:link", "http://www.xbrl.org/2003/linkbase"),
    ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
    ("xmlns:iso4217", "http://www.xbrl.org/2003/iso4217"),
];

/// Host substring the schema reference must point at.
pub const TAXONOMY_HOST: &str = "xbrl.frc.org.uk";

/// Taxonomy-publisher prefix used to tell publisher-tagged elements apart
/// from other qualified names.
pub const TAXONOMY_PREFIX: &str = "uk-";

pub(crate) fn validate_structure(doc: &Document, out: &mut ValidationResult) {
    for (prefix, expected_uri) in REQUIRED_NAMESPACES {
        match doc.root.attr(prefix) {
            None => out.push(
                Issue::error(
                    IssueCode::MissingNamespace,
                    format!("required namespace declaration {prefix} is missing from the root element"),
                )
                .with_element(prefix),
            ),
            Some(uri) if uri != expected_uri => out.push(
                Issue::error(
                    IssueCode::IncorrectNamespaceUri,
                    format!("{prefix} declares \"{uri}\", expected \"{expected_uri}\""),
                )
                .with_element(prefix),
            ),
            Some(_) => {}
        }
    }

    let headers: Vec<_> = doc.walk().filter(|n| n.is("header")).collect();
    let header = match headers.as_slice() {
        [] => {
            out.push(Issue::error(
                IssueCode::MissingIxHeader,
                "document has no ix:header element",
            ));
            // No header means no schemaRef to inspect.
            return;
        }
        [single] => *single,
        [first, rest @ ..] => {
            out.push(Issue::error(
                IssueCode::DuplicateIxHeader,
                format!("document has {} ix:header elements, expected exactly one", rest.len() + 1),
            ));
            *first
        }
    };

    let schema_ref = header.walk().find(|n| n.is("schemaRef"));
    let schema_ref = match schema_ref {
        Some(node) => node,
        None => {
            out.push(Issue::error(
                IssueCode::MissingSchemaRef,
                "ix:header has no link:schemaRef element",
            ));
            return;
        }
    };

    let href = schema_ref
        .attr("xlink:href")
        .or_else(|| schema_ref.attr("href"));
    match href {
        None => out.push(
            Issue::error(
                IssueCode::InvalidSchemaRef,
                "link:schemaRef has no xlink:href attribute",
            )
            .with_element(schema_ref.name.as_str()),
        ),
        Some(href) if !href.contains(TAXONOMY_HOST) => out.push(
            Issue::error(
                IssueCode::InvalidSchemaRef,
                format!("schema reference \"{href}\" does not point at {TAXONOMY_HOST}"),
            )
            .with_element(schema_ref.name.as_str()),
        ),
        Some(_) => {}
    }
}
