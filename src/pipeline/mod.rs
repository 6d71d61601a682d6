//! Pure pipeline from raw pageview records to engagement metrics.
//!
//! Stages live in [`stages`] and are plain functions over slices; [`report`]
//! wires them together for callers that want everything at once.

pub mod report;
pub mod stages;

pub use report::{build_report, CountryRanking, EngagementReport, ReportRequest, Selection};
pub use stages::aggregation::{aggregate_country_views, aggregate_region_views};
pub use stages::filtering::project_metrics;
pub use stages::normalize::{normalize, normalize_with, per_capita, zscores};
pub use stages::population::{
    dedupe_country_population, reconcile_population, reconcile_population_with,
    sum_region_population, DedupStrategy,
};
pub use stages::ranking::{top_articles, DEFAULT_TOP_N};
pub use stages::year::extract_year;
