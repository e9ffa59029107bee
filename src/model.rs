//! Core data model for the validation engine.

use crate::Error;
use chrono::NaiveDate;
use compact_str::CompactString;
use std::fmt;
use std::str::FromStr;

/// Entity size tier declared by the filer. Selects which completeness
/// rule-set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitySize {
    Micro,
    Small,
    Medium,
    Large,
}

impl EntitySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EntitySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntitySize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "micro" => Ok(Self::Micro),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(Error::InvalidEntitySize(other.to_string())),
        }
    }
}

/// Reporting period of a context: a point in time or a date range.
/// A well-formed duration has `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Instant(NaiveDate),
    Duration { start: NaiveDate, end: NaiveDate },
}

/// A declared reporting context: entity plus period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub id: CompactString,
    pub entity_identifier: Option<CompactString>,
    /// `None` when the period was missing or malformed; the corresponding
    /// diagnostics are raised by the context validator.
    pub period: Option<Period>,
}

/// A declared measurement unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: CompactString,
    pub measures: Vec<CompactString>,
}

/// Strict `YYYY-MM-DD` date parse: exactly ten characters and a real
/// calendar date. Looser forms chrono would accept ("2023-1-1") are
/// rejected by the length gate.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
