//! dates.rs
//!
//! GitHub timestamps arrive as RFC 3339 strings ("2011-01-25T18:44:36Z").
//! The page shows them as plain calendar dates in a configurable format.
//!
//! Dates are taken in UTC so the same payload always renders the same way,
//! whatever machine builds the page. Anything that does not parse renders
//! as "Invalid Date", which is what a browser prints for a missing field.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Write;

pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// True when chrono understands every specifier in the pattern.
    pub fn is_valid(&self) -> bool {
        !StrftimeItems::new(&self.pattern).any(|item| matches!(item, Item::Error))
    }

    /// Format an optional API timestamp as a calendar date.
    pub fn display(&self, raw: Option<&str>) -> String {
        let Some(date) = raw.and_then(parse_timestamp) else {
            return INVALID_DATE.to_string();
        };
        // chrono reports a bad pattern as a fmt error rather than panicking here
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.pattern)) {
            Ok(()) => out,
            Err(_) => INVALID_DATE.to_string(),
        }
    }
}

/// Accepts full RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
