//! Validation pipeline.
//!
//! One call takes one document and returns one result. The parse step is
//! the only early exit; every later pass runs to completion and appends
//! its findings so the caller gets the full defect list in one round
//! trip. Each pass is an infallible function over the immutable tree, so
//! a finding in one pass can never keep another pass from running.

use crate::diagnostics::ValidationResult;
use crate::model::EntitySize;
use crate::report::Stats;
use crate::{completeness, contexts, crossref, facts, parser, placeholder, structural};
use crate::Result;
use std::path::Path;
use std::time::Instant;

/// Validate a filing document against the rules for the given entity size.
///
/// Pure and self-contained: no state survives the call, so independent
/// documents may be validated concurrently from separate threads.
pub fn validate(document: &str, size: EntitySize) -> ValidationResult {
    let started = Instant::now();
    let mut result = ValidationResult::new();

    let doc = match parser::parse_document(document) {
        Ok(doc) => doc,
        Err(issue) => {
            // Fatal: no tree, so none of the later passes can run.
            // Statistics stay at their zero defaults.
            result.push(issue);
            result.is_valid = false;
            tracing::debug!("validation aborted on parse failure");
            return result;
        }
    };

    tracing::debug!(nodes = doc.walk().count(), size = %size, "parsed filing document");

    structural::validate_structure(&doc, &mut result);
    let (declared_contexts, declared_units) =
        contexts::validate_contexts_and_units(&doc, &mut result);
    completeness::validate_completeness(&doc, size, &mut result);
    crossref::validate_references(&doc, &declared_contexts, &declared_units, &mut result);
    facts::validate_facts(&doc, &mut result);
    placeholder::detect_placeholders(&doc, &mut result);

    result.stats = Stats::collect(&doc, started.elapsed());
    result.finalize();

    tracing::debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        placeholders = result.placeholders.len(),
        valid = result.is_valid,
        "validation complete"
    );

    result
}

/// Read a filing from disk and validate it.
pub fn validate_file<P: AsRef<Path>>(path: P, size: EntitySize) -> Result<ValidationResult> {
    let document = std::fs::read_to_string(path)?;
    Ok(validate(&document, size))
}
