//! Cross-reference checks: every contextRef/unitRef anywhere in the tree
//! must resolve to a declared context/unit id.

use crate::diagnostics::{Issue, IssueCode, ValidationResult};
use crate::dom::{Document, Node};
use crate::model::{Context, Unit};
use ahash::AHashSet;

pub(crate) fn validate_references(
    doc: &Document,
    contexts: &[Context],
    units: &[Unit],
    out: &mut ValidationResult,
) {
    let context_ids: AHashSet<&str> = contexts.iter().map(|c| c.id.as_str()).collect();
    let unit_ids: AHashSet<&str> = units.iter().map(|u| u.id.as_str()).collect();

    // The scan is deliberately tree-wide, not restricted to fact elements,
    // so tagged content at any nesting depth gets checked. When no ids are
    // declared at all the per-node checks are skipped: the document-level
    // MISSING_CONTEXTS / MISSING_UNITS diagnostic already covers it.
    for node in doc.walk() {
        if !context_ids.is_empty() {
            if let Some(context_ref) = node.attr("contextRef") {
                if !context_ids.contains(context_ref) {
                    out.push(
                        Issue::error(
                            IssueCode::InvalidContextRef,
                            format!("contextRef \"{context_ref}\" does not match any declared context"),
                        )
                        .with_element(element_label(node)),
                    );
                }
            }
        }
        if !unit_ids.is_empty() {
            if let Some(unit_ref) = node.attr("unitRef") {
                if !unit_ids.contains(unit_ref) {
                    out.push(
                        Issue::error(
                            IssueCode::InvalidUnitRef,
                            format!("unitRef \"{unit_ref}\" does not match any declared unit"),
                        )
                        .with_element(element_label(node)),
                    );
                }
            }
        }
    }
}

/// Taxonomy name when the element is tagged, tag name otherwise.
fn element_label(node: &Node) -> &str {
    node.attr("name").unwrap_or(&node.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use compact_str::CompactString;

    fn ctx(id: &str) -> Context {
        Context {
            id: CompactString::from(id),
            entity_identifier: None,
            period: None,
        }
    }

    fn unit(id: &str) -> Unit {
        Unit {
            id: CompactString::from(id),
            measures: vec![CompactString::from("iso4217:GBP")],
        }
    }

    fn check(body: &str, contexts: &[Context], units: &[Unit]) -> ValidationResult {
        let doc = parse(&format!("<root>{body}</root>")).unwrap();
        let mut result = ValidationResult::new();
        validate_references(&doc, contexts, units, &mut result);
        result
    }

    #[test]
    fn resolving_references_pass() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:TurnoverRevenue" contextRef="c1" unitRef="gbp">1</ix:nonFraction>"#,
            &[ctx("c1")],
            &[unit("gbp")],
        );
        assert!(result.errors.is_empty());
    }

    #[test]
    fn dangling_context_ref_names_the_id() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:TurnoverRevenue" contextRef="ctx99" unitRef="gbp">1</ix:nonFraction>"#,
            &[ctx("c1")],
            &[unit("gbp")],
        );
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, IssueCode::InvalidContextRef);
        assert!(result.errors[0].message.contains("ctx99"));
        assert_eq!(
            result.errors[0].element.as_deref(),
            Some("uk-core:TurnoverRevenue")
        );
    }

    #[test]
    fn untagged_elements_fall_back_to_tag_name() {
        let result = check(
            r#"<span contextRef="nope">x</span>"#,
            &[ctx("c1")],
            &[unit("gbp")],
        );
        assert_eq!(result.errors[0].element.as_deref(), Some("span"));
    }

    #[test]
    fn nested_references_are_checked() {
        let result = check(
            r#"<div><table><td><ix:nonNumeric name="uk-bus:NameEntityOfficer" contextRef="ghost">A B</ix:nonNumeric></td></table></div>"#,
            &[ctx("c1")],
            &[unit("gbp")],
        );
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn checks_are_skipped_when_nothing_is_declared() {
        let result = check(
            r#"<ix:nonFraction name="uk-core:TurnoverRevenue" contextRef="c1" unitRef="gbp">1</ix:nonFraction>"#,
            &[],
            &[],
        );
        assert!(result.errors.is_empty());
    }
}
