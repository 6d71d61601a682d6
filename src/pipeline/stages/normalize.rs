//! Engagement normalization: per-capita rates and their z-scores.
//!
//! The z-score reference set is always the full joined table built here.
//! Year and region filters are applied afterwards by
//! [`super::filtering::project_metrics`], which never recomputes statistics.

use crate::config::{Deviation, NormalizationConfig};
use crate::core::{
    EngagementMetric, Error, Region, RegionYearAggregate, RegionYearPopulation, Result, Year,
};
use std::collections::{HashMap, HashSet};

/// Join view totals onto reconciled populations and normalize (pure).
///
/// Uses a rate per million inhabitants and population standard deviation.
pub fn normalize(
    region_aggregates: &[RegionYearAggregate],
    region_populations: &[RegionYearPopulation],
) -> Result<Vec<EngagementMetric>> {
    normalize_with(
        region_aggregates,
        region_populations,
        &NormalizationConfig::default(),
    )
}

/// Join view totals onto reconciled populations and normalize (pure).
///
/// Every population row survives the join; a (region, year) without views
/// gets `total_views = 0`. Aggregates with no population row are dropped.
///
/// # Errors
///
/// [`Error::DivisionByZero`] for a zero population and
/// [`Error::InvalidPopulation`] for a negative or non-finite one.
pub fn normalize_with(
    region_aggregates: &[RegionYearAggregate],
    region_populations: &[RegionYearPopulation],
    config: &NormalizationConfig,
) -> Result<Vec<EngagementMetric>> {
    let views: HashMap<(Region, &Year), i64> = region_aggregates
        .iter()
        .map(|a| ((a.region, &a.year), a.total_views))
        .collect();

    let known: HashSet<(Region, &Year)> = region_populations
        .iter()
        .map(|p| (p.region, &p.year))
        .collect();
    for agg in region_aggregates {
        if !known.contains(&(agg.region, &agg.year)) {
            tracing::debug!(
                region = %agg.region,
                year = %agg.year,
                views = agg.total_views,
                "Dropping views with no reconciled population"
            );
        }
    }

    let mut metrics = region_populations
        .iter()
        .map(|pop| {
            let total_views = views.get(&(pop.region, &pop.year)).copied().unwrap_or(0);
            let views_per_capita =
                per_capita(total_views, pop.population, config.scale, pop.region, &pop.year)?;
            Ok(EngagementMetric {
                region: pop.region,
                year: pop.year.clone(),
                total_views,
                population: pop.population,
                views_per_capita,
                views_zscore: 0.0,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let rates: Vec<f64> = metrics.iter().map(|m| m.views_per_capita).collect();
    for (metric, z) in metrics.iter_mut().zip(zscores(&rates, config.deviation)) {
        metric.views_zscore = z;
    }

    Ok(metrics)
}

/// Views per `scale` inhabitants.
pub fn per_capita(
    total_views: i64,
    population: f64,
    scale: f64,
    region: Region,
    year: &Year,
) -> Result<f64> {
    if population == 0.0 {
        return Err(Error::DivisionByZero {
            region,
            year: year.clone(),
        });
    }
    if !population.is_finite() || population < 0.0 {
        return Err(Error::InvalidPopulation {
            region,
            year: year.clone(),
            population,
        });
    }
    Ok(total_views as f64 / population * scale)
}

/// Standard scores of `values` against their own mean and deviation.
///
/// When the deviation is zero or undefined every score is `0.0`.
pub fn zscores(values: &[f64], deviation: Deviation) -> Vec<f64> {
    let n = values.len();
    let divisor = match deviation {
        Deviation::Population => n as f64,
        Deviation::Sample => n.saturating_sub(1) as f64,
    };
    if n == 0 || divisor == 0.0 {
        return vec![0.0; n];
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / divisor;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return vec![0.0; n];
    }

    values.iter().map(|v| (v - mean) / std_dev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(region: Region, year: &str, total_views: i64) -> RegionYearAggregate {
        RegionYearAggregate {
            region,
            year: Year::from(year),
            total_views,
        }
    }

    fn pop(region: Region, year: &str, population: f64) -> RegionYearPopulation {
        RegionYearPopulation {
            region,
            year: Year::from(year),
            population,
        }
    }

    #[test]
    fn test_per_capita_rate_per_million() {
        let metrics = normalize(
            &[agg(Region::Africa, "2023", 3000)],
            &[pop(Region::Africa, "2023", 50_000_000.0)],
        )
        .unwrap();

        assert_eq!(metrics.len(), 1);
        assert!((metrics[0].views_per_capita - 60.0).abs() < 1e-9);
        assert_eq!(metrics[0].views_zscore, 0.0);
    }

    #[test]
    fn test_right_join_keeps_population_without_views() {
        let metrics = normalize(
            &[agg(Region::Africa, "2023", 100)],
            &[
                pop(Region::Africa, "2023", 1_000_000.0),
                pop(Region::Oceania, "2023", 2_000_000.0),
            ],
        )
        .unwrap();

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[1].region, Region::Oceania);
        assert_eq!(metrics[1].total_views, 0);
        assert_eq!(metrics[1].views_per_capita, 0.0);
    }

    #[test]
    fn test_views_without_population_are_dropped() {
        let metrics = normalize(
            &[agg(Region::Africa, "2023", 100), agg(Region::Asia, "2024", 9)],
            &[pop(Region::Africa, "2023", 1_000_000.0)],
        )
        .unwrap();

        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].region, Region::Africa);
    }

    #[test]
    fn test_zero_population_is_division_by_zero() {
        let err = normalize(
            &[agg(Region::Europe, "2024", 10)],
            &[pop(Region::Europe, "2024", 0.0)],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::DivisionByZero {
                region: Region::Europe,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_population_rejected() {
        let err = per_capita(1, -5.0, 1.0, Region::Asia, &Year::from("2023")).unwrap_err();
        assert!(matches!(err, Error::InvalidPopulation { .. }));
    }

    #[test]
    fn test_zscores_population_deviation() {
        let z = zscores(&[1.0, 2.0, 3.0], Deviation::Population);
        let expected = 1.0 / (2.0f64 / 3.0).sqrt();

        assert!((z[0] + expected).abs() < 1e-12);
        assert_eq!(z[1], 0.0);
        assert!((z[2] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zscores_sample_deviation() {
        let z = zscores(&[1.0, 2.0, 3.0], Deviation::Sample);
        assert!((z[0] + 1.0).abs() < 1e-12);
        assert!((z[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zscores_degenerate_inputs() {
        assert!(zscores(&[], Deviation::Population).is_empty());
        assert_eq!(zscores(&[4.0], Deviation::Sample), vec![0.0]);
        assert_eq!(zscores(&[2.0, 2.0], Deviation::Population), vec![0.0, 0.0]);
    }

    #[test]
    fn test_custom_scale() {
        let config = NormalizationConfig {
            scale: 1000.0,
            deviation: Deviation::Population,
        };
        let metrics = normalize_with(
            &[agg(Region::Asia, "2023", 50)],
            &[pop(Region::Asia, "2023", 1000.0)],
            &config,
        )
        .unwrap();

        assert_eq!(metrics[0].views_per_capita, 50.0);
    }
}
