//! Tier-dependent completeness checks.
//!
//! A static table maps each entity size to the tagged elements a filing of
//! that size must carry; the effective set for a run is the "all entities"
//! list plus the size-specific list. A handful of regulatory invariants
//! are enforced on top, independent of the table.

use crate::diagnostics::{Issue, IssueCode, ValidationResult};
use crate::dom::Document;
use crate::model::EntitySize;

/// `(taxonomy name, human description)` of a required tagged element.
type Requirement = (&'static str, &'static str);

pub(crate) const TURNOVER: &str = "uk-core:TurnoverRevenue";
pub(crate) const AVERAGE_EMPLOYEES: &str = "uk-core:AverageNumberEmployeesDuringPeriod";
pub(crate) const PRINCIPAL_ACTIVITIES: &str = "uk-bus:DescriptionPrincipalActivities";
pub(crate) const DIRECTOR_NAME: &str = "uk-bus:NameEntityOfficer";

/// Required for every entity regardless of size.
const REQUIRED_ALL: &[Requirement] = &[
    (TURNOVER, "Turnover"),
    (AVERAGE_EMPLOYEES, "Average number of employees during the period"),
];

const REQUIRED_MICRO: &[Requirement] = &[];

// Small, medium and large entities enumerate the same directors-report
// baseline independently rather than inheriting from each other.
const REQUIRED_SMALL: &[Requirement] = &[
    (PRINCIPAL_ACTIVITIES, "Description of principal activities"),
    (DIRECTOR_NAME, "Name of director"),
];

const REQUIRED_MEDIUM: &[Requirement] = &[
    (PRINCIPAL_ACTIVITIES, "Description of principal activities"),
    (DIRECTOR_NAME, "Name of director"),
];

const REQUIRED_LARGE: &[Requirement] = &[
    (PRINCIPAL_ACTIVITIES, "Description of principal activities"),
    (DIRECTOR_NAME, "Name of director"),
];

fn rules_for(size: EntitySize) -> &'static [Requirement] {
    match size {
        EntitySize::Micro => REQUIRED_MICRO,
        EntitySize::Small => REQUIRED_SMALL,
        EntitySize::Medium => REQUIRED_MEDIUM,
        EntitySize::Large => REQUIRED_LARGE,
    }
}

pub(crate) fn validate_completeness(
    doc: &Document,
    size: EntitySize,
    out: &mut ValidationResult,
) {
    let has = |taxonomy_name: &str| doc.tagged(taxonomy_name).next().is_some();

    for (name, description) in REQUIRED_ALL.iter().chain(rules_for(size)) {
        if !has(name) {
            out.push(
                Issue::error(
                    IssueCode::MissingRequiredElement,
                    format!("required element {name} ({description}) was not found"),
                )
                .with_element(*name),
            );
        }
    }

    // Regulatory invariants, checked independently of the table above.
    if !has(TURNOVER) {
        out.push(
            Issue::error(
                IssueCode::MissingProfitLoss,
                "profit and loss turnover figure is mandatory for every entity size",
            )
            .with_element(TURNOVER),
        );
    }

    if size != EntitySize::Micro {
        if !has(PRINCIPAL_ACTIVITIES) {
            out.push(
                Issue::error(
                    IssueCode::MissingDirectorsReport,
                    format!(
                        "directors' report principal activities are mandatory for {size} entities"
                    ),
                )
                .with_element(PRINCIPAL_ACTIVITIES),
            );
        }
        if doc.tagged(DIRECTOR_NAME).next().is_none() {
            out.push(
                Issue::error(
                    IssueCode::MissingDirectorNames,
                    format!("at least one named director is mandatory for {size} entities"),
                )
                .with_element(DIRECTOR_NAME),
            );
        }
    }

    if !has(AVERAGE_EMPLOYEES) {
        out.push(
            Issue::error(
                IssueCode::MissingAverageEmployees,
                "average employee count is mandatory for every entity size",
            )
            .with_element(AVERAGE_EMPLOYEES),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn check(body: &str, size: EntitySize) -> Vec<IssueCode> {
        let doc = parse(&format!("<root>{body}</root>")).unwrap();
        let mut result = ValidationResult::new();
        validate_completeness(&doc, size, &mut result);
        result.errors.iter().map(|e| e.code).collect()
    }

    fn fact(name: &str) -> String {
        format!(r#"<span name="{name}">value</span>"#)
    }

    fn baseline() -> String {
        format!("{}{}", fact(TURNOVER), fact(AVERAGE_EMPLOYEES))
    }

    #[test]
    fn micro_baseline_is_complete() {
        assert!(check(&baseline(), EntitySize::Micro).is_empty());
    }

    #[test]
    fn missing_turnover_fires_table_and_invariant() {
        let codes = check(&fact(AVERAGE_EMPLOYEES), EntitySize::Micro);
        assert!(codes.contains(&IssueCode::MissingRequiredElement));
        assert!(codes.contains(&IssueCode::MissingProfitLoss));
    }

    #[test]
    fn missing_employees_is_flagged_for_all_sizes() {
        for size in [
            EntitySize::Micro,
            EntitySize::Small,
            EntitySize::Medium,
            EntitySize::Large,
        ] {
            let codes = check(&fact(TURNOVER), size);
            assert!(codes.contains(&IssueCode::MissingAverageEmployees), "{size}");
        }
    }

    #[test]
    fn directors_report_required_above_micro() {
        let body = baseline();
        assert!(!check(&body, EntitySize::Micro).contains(&IssueCode::MissingDirectorsReport));
        for size in [EntitySize::Small, EntitySize::Medium, EntitySize::Large] {
            let codes = check(&body, size);
            assert!(codes.contains(&IssueCode::MissingDirectorsReport), "{size}");
            assert!(codes.contains(&IssueCode::MissingDirectorNames), "{size}");
        }
    }

    #[test]
    fn small_entity_with_directors_report_is_complete() {
        let body = format!(
            "{}{}{}",
            baseline(),
            fact(PRINCIPAL_ACTIVITIES),
            fact(DIRECTOR_NAME)
        );
        assert!(check(&body, EntitySize::Small).is_empty());
    }

    #[test]
    fn any_element_position_counts() {
        // The required tag may sit anywhere in the tree, however nested.
        let body = format!("<div><p><b>{}</b></p></div>{}", fact(TURNOVER), fact(AVERAGE_EMPLOYEES));
        assert!(check(&body, EntitySize::Micro).is_empty());
    }
}
