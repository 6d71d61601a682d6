//! Top-N article ranking for a single country and year.

use super::year::extract_year;
use crate::core::{ArticleRanking, Error, RawRecord, Result, Year};
use std::collections::HashMap;

/// Default number of articles returned by [`top_articles`].
pub const DEFAULT_TOP_N: usize = 25;

/// Rank articles in a (country, year) slice by summed views (pure).
///
/// Articles are grouped in the order they first appear in `records`, then
/// stable-sorted by views descending, so ties keep that first-appearance
/// order.
///
/// # Arguments
///
/// * `records` - Raw pageview records
/// * `country` - Country to rank, matched exactly
/// * `year` - Year label to rank
/// * `n` - Maximum number of rows returned
///
/// # Errors
///
/// [`Error::EmptyResult`] when no record matches the filter and
/// [`Error::ViewOverflow`] when an article total leaves the `i64` range.
pub fn top_articles(
    records: &[RawRecord],
    country: &str,
    year: &Year,
    n: usize,
) -> Result<Vec<ArticleRanking>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, i64)> = Vec::new();

    for record in records {
        if record.country != country || &extract_year(&record.date)? != year {
            continue;
        }
        match positions.get(record.article.as_str()) {
            Some(&pos) => {
                totals[pos].1 = totals[pos].1.checked_add(record.views).ok_or_else(|| {
                    Error::view_overflow(format!("{} {} {}", country, year, record.article))
                })?;
            }
            None => {
                positions.insert(record.article.as_str(), totals.len());
                totals.push((record.article.as_str(), record.views));
            }
        }
    }

    if totals.is_empty() {
        return Err(Error::empty_result(format!(
            "country={} year={}",
            country, year
        )));
    }

    // `sort_by` is stable
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(totals
        .into_iter()
        .take(n)
        .map(|(article, views)| ArticleRanking {
            country: country.to_string(),
            year: year.clone(),
            article: article.to_string(),
            views,
        })
        .collect())
}
