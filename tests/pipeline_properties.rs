//! Property-based tests for the engagement pipeline
//!
//! These tests verify invariants that should hold for all inputs:
//! - View totals are conserved per year by regional aggregation
//! - Population deduplication is idempotent
//! - Per-capita rates scale linearly with views
//! - Z-scores over the full table have mean 0 and standard deviation 1
//! - Rankings are sorted and bounded by n
//! - Display projection never alters z-scores

mod common;

use common::{record, ARTICLES, COUNTRIES, YEARS};
use engagemap::{
    aggregate_region_views, dedupe_country_population, normalize, project_metrics,
    reconcile_population, top_articles, DedupStrategy, RawRecord, Region, Year,
};
use proptest::prelude::*;
use std::collections::HashMap;

/// Generate a table of fixture-backed records
fn records_strategy() -> impl Strategy<Value = Vec<RawRecord>> {
    prop::collection::vec(
        (
            0..ARTICLES.len(),
            0..COUNTRIES.len(),
            0..YEARS.len(),
            1u32..29,
            0i64..50_000,
        ),
        1..120,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(a, c, y, day, views)| record(a, c, y, day, views))
            .collect()
    })
}

fn views_by_year(records: &[RawRecord]) -> HashMap<String, i64> {
    let mut totals = HashMap::new();
    for r in records {
        let year = r.date.split('-').next().unwrap().to_string();
        *totals.entry(year).or_insert(0) += r.views;
    }
    totals
}

proptest! {
    /// Property: summing region aggregates for a year gives the raw total for that year
    #[test]
    fn prop_region_totals_conserve_views(records in records_strategy()) {
        let aggregates = aggregate_region_views(&records).unwrap();

        let mut aggregated: HashMap<String, i64> = HashMap::new();
        for a in &aggregates {
            *aggregated.entry(a.year.to_string()).or_insert(0) += a.total_views;
        }

        prop_assert_eq!(aggregated, views_by_year(&records));
    }

    /// Property: reconciling an already-deduplicated table changes nothing
    #[test]
    fn prop_dedup_is_idempotent(records in records_strategy()) {
        let deduped = dedupe_country_population(&records, DedupStrategy::FirstSeen).unwrap();
        let as_records: Vec<RawRecord> = deduped
            .iter()
            .map(|row| RawRecord::new(
                "any",
                row.country.clone(),
                row.region,
                format!("{}-06-01", row.year),
                0,
                row.population,
            ))
            .collect();

        let again = dedupe_country_population(&as_records, DedupStrategy::FirstSeen).unwrap();
        prop_assert_eq!(&again, &deduped);
        prop_assert_eq!(
            reconcile_population(&as_records).unwrap(),
            reconcile_population(&records).unwrap()
        );
    }

    /// Property: doubling every view doubles every per-capita rate
    #[test]
    fn prop_per_capita_is_linear_in_views(records in records_strategy()) {
        let doubled: Vec<RawRecord> = records
            .iter()
            .cloned()
            .map(|mut r| { r.views *= 2; r })
            .collect();

        let population = reconcile_population(&records).unwrap();
        let base = normalize(&aggregate_region_views(&records).unwrap(), &population).unwrap();
        let scaled = normalize(&aggregate_region_views(&doubled).unwrap(), &population).unwrap();

        for (b, s) in base.iter().zip(scaled.iter()) {
            let expected = 2.0 * b.views_per_capita;
            prop_assert!((s.views_per_capita - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    /// Property: z-scores over the full table are standardized
    #[test]
    fn prop_zscores_are_standardized(records in records_strategy()) {
        let metrics = normalize(
            &aggregate_region_views(&records).unwrap(),
            &reconcile_population(&records).unwrap(),
        ).unwrap();

        let rates: Vec<f64> = metrics.iter().map(|m| m.views_per_capita).collect();
        let max = rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = rates.iter().cloned().fold(f64::INFINITY, f64::min);
        prop_assume!(metrics.len() >= 2 && (max - min) > 1e-6 * max.abs().max(1.0));

        let n = metrics.len() as f64;
        let mean = metrics.iter().map(|m| m.views_zscore).sum::<f64>() / n;
        let variance = metrics
            .iter()
            .map(|m| (m.views_zscore - mean).powi(2))
            .sum::<f64>() / n;

        prop_assert!(mean.abs() < 1e-9, "mean was {}", mean);
        prop_assert!((variance.sqrt() - 1.0).abs() < 1e-9, "std was {}", variance.sqrt());
    }

    /// Property: rankings are non-increasing and never longer than n
    #[test]
    fn prop_top_articles_sorted_and_bounded(
        records in records_strategy(),
        country_idx in 0..COUNTRIES.len(),
        year_idx in 0..YEARS.len(),
        n in 0usize..8,
    ) {
        let year = Year::from(YEARS[year_idx]);
        match top_articles(&records, COUNTRIES[country_idx].0, &year, n) {
            Ok(ranked) => {
                prop_assert!(ranked.len() <= n);
                prop_assert!(ranked.windows(2).all(|w| w[0].views >= w[1].views));
            }
            Err(engagemap::Error::EmptyResult { .. }) => {
                let present = records.iter().any(|r| {
                    r.country == COUNTRIES[country_idx].0 && r.date.starts_with(YEARS[year_idx])
                });
                prop_assert!(!present);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    /// Property: projection copies z-scores from the full table unchanged
    #[test]
    fn prop_projection_preserves_zscores(
        records in records_strategy(),
        year_idx in 0..YEARS.len(),
        region_mask in 0u8..32,
    ) {
        let metrics = normalize(
            &aggregate_region_views(&records).unwrap(),
            &reconcile_population(&records).unwrap(),
        ).unwrap();
        let regions: Vec<Region> = Region::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| region_mask & (1 << i) != 0)
            .map(|(_, r)| r)
            .collect();

        let view = project_metrics(&metrics, Some(&Year::from(YEARS[year_idx])), &regions);

        for row in &view {
            let original = metrics
                .iter()
                .find(|m| m.region == row.region && m.year == row.year)
                .unwrap();
            prop_assert_eq!(row, original);
        }
        prop_assert!(view
            .windows(2)
            .all(|w| w[0].views_per_capita >= w[1].views_per_capita));
    }
}
