//! Population reconciliation.
//!
//! Raw records repeat a country's population on every article row, so
//! population cannot be summed directly. Records are first reduced to one
//! figure per (country, year), then those figures are summed per
//! (region, year).

use super::year::extract_year;
use crate::core::{
    CountryYearPopulation, Error, RawRecord, Region, RegionYearPopulation, Result, Year,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Which population value survives when a (country, year) key repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupStrategy {
    /// First record in table order wins
    #[default]
    FirstSeen,
    /// Last record in table order wins
    Latest,
    /// Largest population wins
    Max,
    /// Differing values for the same key are an error
    ErrorOnConflict,
}

impl DedupStrategy {
    /// Fold a newly seen value into the retained one.
    fn resolve(self, kept: &CountryYearPopulation, candidate: f64) -> Result<f64> {
        match self {
            Self::FirstSeen => Ok(kept.population),
            Self::Latest => Ok(candidate),
            Self::Max => Ok(kept.population.max(candidate)),
            Self::ErrorOnConflict if kept.population != candidate => {
                Err(Error::PopulationConflict {
                    country: kept.country.clone(),
                    year: kept.year.clone(),
                    first: kept.population,
                    conflicting: candidate,
                })
            }
            Self::ErrorOnConflict => Ok(kept.population),
        }
    }
}

/// Reduce records to one population figure per (country, year) (pure).
///
/// Keys appear in the order they are first seen. The region of the first
/// record for a key is retained.
///
/// # Arguments
///
/// * `records` - Raw pageview records
/// * `strategy` - Tie-break policy for repeated keys
///
/// # Errors
///
/// [`Error::MalformedDate`] for undatable records, and
/// [`Error::PopulationConflict`] under [`DedupStrategy::ErrorOnConflict`].
pub fn dedupe_country_population(
    records: &[RawRecord],
    strategy: DedupStrategy,
) -> Result<Vec<CountryYearPopulation>> {
    let mut index: HashMap<(String, Year), usize> = HashMap::new();
    let mut rows: Vec<CountryYearPopulation> = Vec::new();

    for record in records {
        let year = extract_year(&record.date)?;
        let key = (record.country.clone(), year);

        match index.get(&key) {
            Some(&pos) => {
                let resolved = strategy.resolve(&rows[pos], record.population)?;
                rows[pos].population = resolved;
            }
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(CountryYearPopulation {
                    country: key.0,
                    region: record.region,
                    year: key.1,
                    population: record.population,
                });
            }
        }
    }

    Ok(rows)
}

/// Sum deduplicated country populations per (region, year) (pure).
///
/// Countries missing from a year contribute nothing to it; absent
/// combinations are not zero-filled.
pub fn sum_region_population(countries: &[CountryYearPopulation]) -> Vec<RegionYearPopulation> {
    let mut totals: BTreeMap<(Region, Year), f64> = BTreeMap::new();

    for row in countries {
        *totals.entry((row.region, row.year.clone())).or_insert(0.0) += row.population;
    }

    totals
        .into_iter()
        .map(|((region, year), population)| RegionYearPopulation {
            region,
            year,
            population,
        })
        .collect()
}

/// Reconcile population per (region, year) using first-seen deduplication.
pub fn reconcile_population(records: &[RawRecord]) -> Result<Vec<RegionYearPopulation>> {
    reconcile_population_with(records, DedupStrategy::default())
}

/// Reconcile population per (region, year) with an explicit strategy.
pub fn reconcile_population_with(
    records: &[RawRecord],
    strategy: DedupStrategy,
) -> Result<Vec<RegionYearPopulation>> {
    let countries = dedupe_country_population(records, strategy)?;
    tracing::debug!(
        countries = countries.len(),
        ?strategy,
        "Deduplicated country populations"
    );
    Ok(sum_region_population(&countries))
}
