//! ixcheck - Inline XBRL validation engine for UK statutory filings
//!
//! Parses a tagged filing document into a tree, runs the structural,
//! context/unit, completeness, cross-reference, fact-value and
//! placeholder passes over it, and returns a full diagnostic result.
//!
//! Licensed under AGPL-3.0

pub mod completeness;
pub mod contexts;
pub mod crossref;
pub mod diagnostics;
pub mod dom;
pub mod facts;
pub mod model;
pub mod parser;
pub mod placeholder;
pub mod report;
pub mod structural;
pub mod validator;

// Re-export the main types
pub use diagnostics::{Issue, IssueCode, Placeholder, Severity, ValidationResult};
pub use dom::{Document, Node};
pub use facts::normalize_numeric;
pub use model::{Context, EntitySize, Period, Unit};
pub use parser::parse;
pub use report::{render, Stats};
pub use validator::{validate, validate_file};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid entity size: {0}")]
    InvalidEntitySize(String),
}
