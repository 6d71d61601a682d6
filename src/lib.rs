//! Per-region pageview engagement from daily per-article pageview tables.
//!
//! The core is a pure pipeline in [`pipeline`]: year extraction, view
//! aggregation, population reconciliation, per-capita normalization with
//! z-scores, and top-N article ranking. [`loader`] validates CSV input at the
//! edge; [`io`] renders reports.
//!
//! ```
//! use engagemap::{aggregate_region_views, normalize, reconcile_population};
//! use engagemap::{RawRecord, Region};
//!
//! let records = vec![
//!     RawRecord::new("A", "Kenya", Region::Africa, "2023-01-01", 1000, 50_000_000.0),
//!     RawRecord::new("B", "Kenya", Region::Africa, "2023-01-02", 2000, 50_000_000.0),
//! ];
//!
//! let views = aggregate_region_views(&records)?;
//! let population = reconcile_population(&records)?;
//! let metrics = normalize(&views, &population)?;
//!
//! assert_eq!(views[0].total_views, 3000);
//! assert_eq!(population[0].population, 50_000_000.0);
//! assert!((metrics[0].views_per_capita - 60.0).abs() < 1e-9);
//! # Ok::<(), engagemap::Error>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod loader;
pub mod observability;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    ArticleRanking, CountryYearAggregate, CountryYearPopulation, EngagementMetric, Error,
    RawRecord, Region, RegionYearAggregate, RegionYearPopulation, Result, Year,
};

pub use crate::pipeline::{
    aggregate_country_views, aggregate_region_views, build_report, dedupe_country_population,
    extract_year, normalize, normalize_with, project_metrics, reconcile_population,
    reconcile_population_with, top_articles, DedupStrategy, EngagementReport, ReportRequest,
    DEFAULT_TOP_N,
};

pub use crate::config::{Deviation, EngagemapConfig, NormalizationConfig};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::loader::RecordTable;
