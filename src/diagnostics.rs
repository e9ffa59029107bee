//! Diagnostic types shared by every validation pass.
//!
//! Each finding is a typed record with a stable machine-checkable code,
//! never a free-form string, so downstream tooling can gate on specific
//! failures.

use crate::report::Stats;
use serde::{Serialize, Serializer};
use std::fmt;

/// How severe a finding is.
///
/// `Fatal` aborts the pipeline (parse failures only). `Error` blocks
/// submission. `Warning` is advisory and never blocks on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => f.write_str("fatal"),
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Machine-readable identifier for a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IssueCode {
    // --- Parser ---
    EmptyDocument,
    ParseFailure,

    // --- Structure ---
    MissingNamespace,
    IncorrectNamespaceUri,
    MissingIxHeader,
    DuplicateIxHeader,
    MissingSchemaRef,
    InvalidSchemaRef,

    // --- Contexts ---
    MissingContexts,
    ContextMissingId,
    DuplicateContextId,
    ContextMissingEntity,
    ContextMissingEntityIdentifier,
    ContextMissingPeriod,
    AmbiguousContextPeriod,
    InvalidContextPeriod,
    InvalidInstantDate,
    InvalidStartDate,
    InvalidEndDate,
    InvalidDateRange,

    // --- Units ---
    MissingUnits,
    UnitMissingId,
    DuplicateUnitId,
    UnitMissingMeasure,

    // --- Completeness ---
    MissingRequiredElement,
    MissingProfitLoss,
    MissingDirectorsReport,
    MissingDirectorNames,
    MissingAverageEmployees,

    // --- Cross-references ---
    InvalidContextRef,
    InvalidUnitRef,

    // --- Fact values ---
    EmptyNumericFact,
    MissingContextRef,
    MissingDecimalsAttribute,
    MissingUnitRef,
    InvalidNumericValue,
    SuspiciousZeroValue,
    EmptyTextualFact,
}

impl IssueCode {
    /// Stable code string used in serialized output and reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDocument => "EMPTY_DOCUMENT",
            Self::ParseFailure => "PARSE_FAILURE",
            Self::MissingNamespace => "MISSING_NAMESPACE",
            Self::IncorrectNamespaceUri => "INCORRECT_NAMESPACE_URI",
            Self::MissingIxHeader => "MISSING_IX_HEADER",
            Self::DuplicateIxHeader => "DUPLICATE_IX_HEADER",
            Self::MissingSchemaRef => "MISSING_SCHEMA_REF",
            Self::InvalidSchemaRef => "INVALID_SCHEMA_REF",
            Self::MissingContexts => "MISSING_CONTEXTS",
            Self::ContextMissingId => "CONTEXT_MISSING_ID",
            Self::DuplicateContextId => "DUPLICATE_CONTEXT_ID",
            Self::ContextMissingEntity => "CONTEXT_MISSING_ENTITY",
            Self::ContextMissingEntityIdentifier => "CONTEXT_MISSING_ENTITY_IDENTIFIER",
            Self::ContextMissingPeriod => "CONTEXT_MISSING_PERIOD",
            Self::AmbiguousContextPeriod => "AMBIGUOUS_CONTEXT_PERIOD",
            Self::InvalidContextPeriod => "INVALID_CONTEXT_PERIOD",
            Self::InvalidInstantDate => "INVALID_INSTANT_DATE",
            Self::InvalidStartDate => "INVALID_START_DATE",
            Self::InvalidEndDate => "INVALID_END_DATE",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::MissingUnits => "MISSING_UNITS",
            Self::UnitMissingId => "UNIT_MISSING_ID",
            Self::DuplicateUnitId => "DUPLICATE_UNIT_ID",
            Self::UnitMissingMeasure => "UNIT_MISSING_MEASURE",
            Self::MissingRequiredElement => "MISSING_REQUIRED_ELEMENT",
            Self::MissingProfitLoss => "MISSING_PROFIT_LOSS",
            Self::MissingDirectorsReport => "MISSING_DIRECTORS_REPORT",
            Self::MissingDirectorNames => "MISSING_DIRECTOR_NAMES",
            Self::MissingAverageEmployees => "MISSING_AVERAGE_EMPLOYEES",
            Self::InvalidContextRef => "INVALID_CONTEXT_REF",
            Self::InvalidUnitRef => "INVALID_UNIT_REF",
            Self::EmptyNumericFact => "EMPTY_NUMERIC_FACT",
            Self::MissingContextRef => "MISSING_CONTEXT_REF",
            Self::MissingDecimalsAttribute => "MISSING_DECIMALS_ATTRIBUTE",
            Self::MissingUnitRef => "MISSING_UNIT_REF",
            Self::InvalidNumericValue => "INVALID_NUMERIC_VALUE",
            Self::SuspiciousZeroValue => "SUSPICIOUS_ZERO_VALUE",
            Self::EmptyTextualFact => "EMPTY_TEXTUAL_FACT",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for IssueCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    pub message: String,
    pub severity: Severity,
    /// Byte offset or similar position hint, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Taxonomy name or tag name of the offending element, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl Issue {
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Error,
            location: None,
            element: None,
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Warning,
            location: None,
            element: None,
        }
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(element) = &self.element {
            write!(f, " (element: {element})")?;
        }
        Ok(())
    }
}

/// Leftover template or dummy content found in document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// One of `placeholder`, `invalid_date`, `suspicious_repeat`.
    pub kind: &'static str,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(element) = &self.element {
            write!(f, " (element: {element})")?;
        }
        Ok(())
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub placeholders: Vec<Placeholder>,
    pub stats: Stats,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            is_valid: false,
            errors: Vec::new(),
            warnings: Vec::new(),
            placeholders: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Route an issue to the errors or warnings list by severity.
    pub(crate) fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Warning => self.warnings.push(issue),
            Severity::Error | Severity::Fatal => self.errors.push(issue),
        }
    }

    /// True when any placeholder finding blocks submission.
    pub fn has_blocking_placeholders(&self) -> bool {
        self.placeholders
            .iter()
            .any(|p| p.severity == Severity::Error)
    }

    /// A document is valid iff there are no errors and no
    /// submission-blocking placeholders.
    pub(crate) fn finalize(&mut self) {
        self.is_valid = self.errors.is_empty() && !self.has_blocking_placeholders();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_routes_by_severity() {
        let mut result = ValidationResult::new();
        result.push(Issue::error(IssueCode::MissingNamespace, "x"));
        result.push(Issue::warning(IssueCode::EmptyNumericFact, "y"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn blocking_placeholder_invalidates() {
        let mut result = ValidationResult::new();
        result.finalize();
        assert!(result.is_valid);

        result.placeholders.push(Placeholder {
            kind: "placeholder",
            message: "left over".into(),
            severity: Severity::Error,
            element: None,
        });
        result.finalize();
        assert!(!result.is_valid);
    }

    #[test]
    fn warning_placeholder_does_not_block() {
        let mut result = ValidationResult::new();
        result.placeholders.push(Placeholder {
            kind: "suspicious_repeat",
            message: "run".into(),
            severity: Severity::Warning,
            element: None,
        });
        result.finalize();
        assert!(result.is_valid);
    }

    #[test]
    fn issue_code_strings_are_stable() {
        assert_eq!(IssueCode::MissingNamespace.code(), "MISSING_NAMESPACE");
        assert_eq!(
            IssueCode::AmbiguousContextPeriod.code(),
            "AMBIGUOUS_CONTEXT_PERIOD"
        );
        assert_eq!(IssueCode::InvalidContextRef.code(), "INVALID_CONTEXT_REF");
    }

    #[test]
    fn issue_serializes_code_string() {
        let issue = Issue::error(IssueCode::MissingSchemaRef, "no schemaRef");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"MISSING_SCHEMA_REF\""));
        assert!(!json.contains("location"));
    }
}
