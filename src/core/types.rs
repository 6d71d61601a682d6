//! Row types flowing through the engagement pipeline.
//!
//! Every stage consumes and produces plain `Vec`s of these structs so the
//! results can be rendered as tables, serialized, or fed to the next stage
//! without any shared state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Continental grouping used to bucket countries.
///
/// Variants are declared alphabetically so the derived `Ord` matches the
/// ordering of sorted group-by output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Americas => "Americas",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Case-insensitive match against the five region names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!(
                    "unknown region '{}' (expected one of Africa, Americas, Asia, Europe, Oceania)",
                    trimmed
                )
            })
    }
}

/// Year label derived from a record's date, e.g. `"2023"`.
///
/// Kept as a string label; ordering is lexical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(String);

impl Year {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Year {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One article-country-day observation.
///
/// `population` repeats on every record of the same country and year; it is
/// country data, not article data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub article: String,
    pub country: String,
    pub region: Region,
    pub date: String,
    pub views: i64,
    pub population: f64,
}

impl RawRecord {
    pub fn new(
        article: impl Into<String>,
        country: impl Into<String>,
        region: Region,
        date: impl Into<String>,
        views: i64,
        population: f64,
    ) -> Self {
        Self {
            article: article.into(),
            country: country.into(),
            region,
            date: date.into(),
            views,
            population,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionYearAggregate {
    pub region: Region,
    pub year: Year,
    pub total_views: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryYearAggregate {
    pub country: String,
    pub year: Year,
    pub total_views: i64,
}

/// The single population figure retained for a (country, year) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearPopulation {
    pub country: String,
    pub region: Region,
    pub year: Year,
    pub population: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionYearPopulation {
    pub region: Region,
    pub year: Year,
    pub population: f64,
}

/// Joined and normalized engagement row for one (region, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetric {
    pub region: Region,
    pub year: Year,
    pub total_views: i64,
    pub population: f64,
    pub views_per_capita: f64,
    pub views_zscore: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRanking {
    pub country: String,
    pub year: Year,
    pub article: String,
    pub views: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("africa".parse::<Region>(), Ok(Region::Africa));
        assert_eq!(" Oceania ".parse::<Region>(), Ok(Region::Oceania));
        assert!("Antarctica".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_order_is_alphabetical() {
        let mut sorted = Region::ALL.to_vec();
        sorted.sort_by_key(|r| r.as_str());
        assert_eq!(sorted, Region::ALL.to_vec());
    }

    #[test]
    fn test_year_serializes_as_plain_string() {
        let json = serde_json::to_string(&Year::from("2024")).unwrap();
        assert_eq!(json, "\"2024\"");
    }
}
