//! Display projection over an already-normalized metric table.
//!
//! These functions select and order rows for presentation only. They copy
//! `views_zscore` through untouched.

use crate::core::{EngagementMetric, Region, Year};

/// Select rows for one year and a set of regions, highest rate first (pure).
///
/// # Arguments
///
/// * `metrics` - Full normalized metric table
/// * `year` - Year to keep, or `None` for every year
/// * `regions` - Regions to keep; an empty slice keeps all regions
///
/// # Returns
///
/// Matching rows sorted by `views_per_capita` descending (stable)
pub fn project_metrics(
    metrics: &[EngagementMetric],
    year: Option<&Year>,
    regions: &[Region],
) -> Vec<EngagementMetric> {
    let mut selected: Vec<EngagementMetric> = metrics
        .iter()
        .filter(|m| year.is_none_or(|y| &m.year == y))
        .filter(|m| regions.is_empty() || regions.contains(&m.region))
        .cloned()
        .collect();

    selected.sort_by(|a, b| b.views_per_capita.total_cmp(&a.views_per_capita));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(region: Region, year: &str, rate: f64, z: f64) -> EngagementMetric {
        EngagementMetric {
            region,
            year: Year::from(year),
            total_views: 0,
            population: 1.0,
            views_per_capita: rate,
            views_zscore: z,
        }
    }

    #[test]
    fn test_filters_year_and_regions() {
        let metrics = vec![
            metric(Region::Africa, "2023", 1.0, -1.0),
            metric(Region::Asia, "2023", 3.0, 1.0),
            metric(Region::Europe, "2023", 2.0, 0.0),
            metric(Region::Asia, "2024", 9.0, 2.0),
        ];

        let view = project_metrics(
            &metrics,
            Some(&Year::from("2023")),
            &[Region::Africa, Region::Asia],
        );

        let regions: Vec<Region> = view.iter().map(|m| m.region).collect();
        assert_eq!(regions, vec![Region::Asia, Region::Africa]);
    }

    #[test]
    fn test_empty_region_list_keeps_all() {
        let metrics = vec![
            metric(Region::Africa, "2023", 1.0, 0.0),
            metric(Region::Oceania, "2023", 5.0, 0.0),
        ];

        let view = project_metrics(&metrics, None, &[]);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].region, Region::Oceania);
    }

    #[test]
    fn test_projection_keeps_zscores() {
        let metrics = vec![
            metric(Region::Africa, "2023", 1.0, -1.2),
            metric(Region::Asia, "2024", 3.0, 1.2),
        ];

        let view = project_metrics(&metrics, Some(&Year::from("2024")), &[]);
        assert_eq!(view, vec![metrics[1].clone()]);
    }
}
