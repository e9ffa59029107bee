//! Context and unit declaration checks.
//!
//! Every declared context needs an id, an entity with an identifier, and a
//! well-formed period (a point in time or a strictly increasing date
//! range). Every declared unit needs an id and at least one measure.

use crate::diagnostics::{Issue, IssueCode, ValidationResult};
use crate::dom::{Document, Node};
use crate::model::{parse_iso_date, Context, Period, Unit};
use ahash::AHashSet;
use compact_str::CompactString;

/// Validate all context and unit declarations, collecting the well-formed
/// ones for the cross-reference pass.
pub(crate) fn validate_contexts_and_units(
    doc: &Document,
    out: &mut ValidationResult,
) -> (Vec<Context>, Vec<Unit>) {
    let context_nodes: Vec<&Node> = doc.walk().filter(|n| n.is("context")).collect();
    let unit_nodes: Vec<&Node> = doc.walk().filter(|n| n.is("unit")).collect();

    if context_nodes.is_empty() {
        out.push(Issue::error(
            IssueCode::MissingContexts,
            "document declares no contexts",
        ));
    }
    if unit_nodes.is_empty() {
        out.push(Issue::error(
            IssueCode::MissingUnits,
            "document declares no units",
        ));
    }

    let mut contexts = Vec::with_capacity(context_nodes.len());
    let mut seen_context_ids = AHashSet::new();
    for node in context_nodes {
        if let Some(context) = validate_context(node, &mut seen_context_ids, out) {
            contexts.push(context);
        }
    }

    let mut units = Vec::with_capacity(unit_nodes.len());
    let mut seen_unit_ids = AHashSet::new();
    for node in unit_nodes {
        if let Some(unit) = validate_unit(node, &mut seen_unit_ids, out) {
            units.push(unit);
        }
    }

    (contexts, units)
}

fn validate_context(
    node: &Node,
    seen: &mut AHashSet<CompactString>,
    out: &mut ValidationResult,
) -> Option<Context> {
    let id = match node.attr("id").filter(|id| !id.is_empty()) {
        Some(id) => CompactString::from(id),
        None => {
            out.push(
                Issue::error(IssueCode::ContextMissingId, "context has no id attribute")
                    .with_element(node.name.as_str()),
            );
            return None;
        }
    };

    if !seen.insert(id.clone()) {
        out.push(
            Issue::error(
                IssueCode::DuplicateContextId,
                format!("context id \"{id}\" is declared more than once"),
            )
            .with_element(id.as_str()),
        );
    }

    let entity_identifier = match node.child("entity") {
        None => {
            out.push(
                Issue::error(
                    IssueCode::ContextMissingEntity,
                    format!("context \"{id}\" has no entity element"),
                )
                .with_element(id.as_str()),
            );
            None
        }
        Some(entity) => match entity.child("identifier") {
            None => {
                out.push(
                    Issue::error(
                        IssueCode::ContextMissingEntityIdentifier,
                        format!("context \"{id}\" entity has no identifier element"),
                    )
                    .with_element(id.as_str()),
                );
                None
            }
            Some(identifier) => Some(CompactString::from(identifier.text.as_str())),
        },
    };

    let period = match node.child("period") {
        None => {
            out.push(
                Issue::error(
                    IssueCode::ContextMissingPeriod,
                    format!("context \"{id}\" has no period element"),
                )
                .with_element(id.as_str()),
            );
            None
        }
        Some(period_node) => validate_period(&id, period_node, out),
    };

    Some(Context {
        id,
        entity_identifier,
        period,
    })
}

/// Period shape rule: exactly one of an instant marker or a start+end pair.
fn validate_period(
    context_id: &str,
    period: &Node,
    out: &mut ValidationResult,
) -> Option<Period> {
    let instant = period.child("instant");
    let start = period.child("startDate");
    let end = period.child("endDate");

    match (instant, start, end) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            out.push(
                Issue::error(
                    IssueCode::AmbiguousContextPeriod,
                    format!("context \"{context_id}\" declares both an instant and a date range"),
                )
                .with_element(context_id),
            );
            None
        }
        (Some(instant), None, None) => {
            match checked_date(context_id, instant, IssueCode::InvalidInstantDate, out) {
                Some(date) => Some(Period::Instant(date)),
                None => None,
            }
        }
        (None, Some(start), Some(end)) => {
            let start_date = checked_date(context_id, start, IssueCode::InvalidStartDate, out);
            let end_date = checked_date(context_id, end, IssueCode::InvalidEndDate, out);
            match (start_date, end_date) {
                (Some(start), Some(end)) if end <= start => {
                    out.push(
                        Issue::error(
                            IssueCode::InvalidDateRange,
                            format!(
                                "context \"{context_id}\" period ends on {end}, which is not after its start {start}"
                            ),
                        )
                        .with_element(context_id),
                    );
                    None
                }
                (Some(start), Some(end)) => Some(Period::Duration { start, end }),
                _ => None,
            }
        }
        _ => {
            // Neither a complete range nor an instant.
            out.push(
                Issue::error(
                    IssueCode::InvalidContextPeriod,
                    format!(
                        "context \"{context_id}\" period is neither an instant nor a complete start/end range"
                    ),
                )
                .with_element(context_id),
            );
            None
        }
    }
}

fn checked_date(
    context_id: &str,
    node: &Node,
    code: IssueCode,
    out: &mut ValidationResult,
) -> Option<chrono::NaiveDate> {
    match parse_iso_date(&node.text) {
        Some(date) => Some(date),
        None => {
            out.push(
                Issue::error(
                    code,
                    format!(
                        "context \"{context_id}\" {} \"{}\" is not a valid YYYY-MM-DD date",
                        node.local_name(),
                        node.text
                    ),
                )
                .with_element(context_id),
            );
            None
        }
    }
}

fn validate_unit(
    node: &Node,
    seen: &mut AHashSet<CompactString>,
    out: &mut ValidationResult,
) -> Option<Unit> {
    let id = match node.attr("id").filter(|id| !id.is_empty()) {
        Some(id) => CompactString::from(id),
        None => {
            out.push(
                Issue::error(IssueCode::UnitMissingId, "unit has no id attribute")
                    .with_element(node.name.as_str()),
            );
            return None;
        }
    };

    if !seen.insert(id.clone()) {
        out.push(
            Issue::error(
                IssueCode::DuplicateUnitId,
                format!("unit id \"{id}\" is declared more than once"),
            )
            .with_element(id.as_str()),
        );
    }

    let measures: Vec<CompactString> = node
        .children
        .iter()
        .filter(|c| c.is("measure"))
        .filter(|c| !c.text.is_empty())
        .map(|c| CompactString::from(c.text.as_str()))
        .collect();

    if measures.is_empty() {
        out.push(
            Issue::error(
                IssueCode::UnitMissingMeasure,
                format!("unit \"{id}\" declares no measure"),
            )
            .with_element(id.as_str()),
        );
    }

    Some(Unit { id, measures })
}
