//! Year bucket derivation.

use crate::core::{Error, Result, Year};

/// Derive the year label from an ISO-style date (pure).
///
/// Returns the text before the first `-`, so `"2023-01-31"` yields `"2023"`.
/// Dates without a `-`, or with nothing before it, are rejected rather than
/// being bucketed under the whole string.
///
/// # Errors
///
/// [`Error::MalformedDate`] when no year component can be found.
pub fn extract_year(date: &str) -> Result<Year> {
    match date.split_once('-') {
        Some((year, _)) if !year.trim().is_empty() => Ok(Year::new(year.trim())),
        _ => Err(Error::malformed_date(date)),
    }
}
