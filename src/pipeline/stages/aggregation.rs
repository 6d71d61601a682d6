//! Pure aggregation functions for summing pageviews.
//!
//! These functions group raw records by a key and sum `views` without side
//! effects. Output is sorted by key so repeated runs produce identical tables.

use super::year::extract_year;
use crate::core::{
    CountryYearAggregate, Error, RawRecord, Region, RegionYearAggregate, Result, Year,
};
use std::collections::BTreeMap;

/// Sum views per (region, year) (pure).
///
/// No records are filtered: zero and negative view counts are summed as-is.
///
/// # Arguments
///
/// * `records` - Raw pageview records
///
/// # Returns
///
/// One aggregate per (region, year), sorted by region then year
///
/// # Errors
///
/// Propagates [`Error::MalformedDate`] from year extraction and returns
/// [`Error::ViewOverflow`] when a total leaves the `i64` range.
pub fn aggregate_region_views(records: &[RawRecord]) -> Result<Vec<RegionYearAggregate>> {
    let mut totals: BTreeMap<(Region, Year), i64> = BTreeMap::new();

    for record in records {
        let year = extract_year(&record.date)?;
        let total = totals.entry((record.region, year)).or_insert(0);
        *total = total
            .checked_add(record.views)
            .ok_or_else(|| overflow_error(&record.region.to_string(), &record.date))?;
    }

    Ok(totals
        .into_iter()
        .map(|((region, year), total_views)| RegionYearAggregate {
            region,
            year,
            total_views,
        })
        .collect())
}

/// Sum views per (country, year) (pure).
///
/// # Arguments
///
/// * `records` - Raw pageview records
///
/// # Returns
///
/// One aggregate per (country, year), sorted by country then year
pub fn aggregate_country_views(records: &[RawRecord]) -> Result<Vec<CountryYearAggregate>> {
    let mut totals: BTreeMap<(String, Year), i64> = BTreeMap::new();

    for record in records {
        let year = extract_year(&record.date)?;
        let total = totals.entry((record.country.clone(), year)).or_insert(0);
        *total = total
            .checked_add(record.views)
            .ok_or_else(|| overflow_error(&record.country, &record.date))?;
    }

    Ok(totals
        .into_iter()
        .map(|((country, year), total_views)| CountryYearAggregate {
            country,
            year,
            total_views,
        })
        .collect())
}

fn overflow_error(group: &str, date: &str) -> Error {
    let year = extract_year(date).map_or_else(|_| date.to_string(), |y| y.to_string());
    Error::view_overflow(format!("{} {}", group, year))
}
