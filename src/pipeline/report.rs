//! End-to-end report assembly.
//!
//! Runs every stage over one immutable [`RecordTable`] with filters passed in
//! explicitly. Statistics are computed over the full table before the
//! year/region projection is taken.

use super::stages::aggregation::{aggregate_country_views, aggregate_region_views};
use super::stages::filtering::project_metrics;
use super::stages::normalize::normalize_with;
use super::stages::population::reconcile_population_with;
use super::stages::ranking::top_articles;
use crate::config::EngagemapConfig;
use crate::core::{
    ArticleRanking, CountryYearAggregate, EngagementMetric, Error, Region, Result, Year,
};
use crate::loader::RecordTable;
use crate::observability::{current_phase, set_phase, PipelinePhase};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span};

/// Filters supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRequest {
    /// Year to display; `None` shows every year
    pub year: Option<Year>,
    /// Regions to display; empty shows all regions
    pub regions: Vec<Region>,
    /// Country to rank articles for (requires `year`)
    pub country: Option<String>,
    /// Overrides the configured ranking length
    pub top: Option<usize>,
    /// Label of the input, shown in report headers
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub year: Option<Year>,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRanking {
    pub country: String,
    pub year: Year,
    pub articles: Vec<ArticleRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementReport {
    pub generated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub record_count: usize,
    pub years: Vec<Year>,
    /// Inhabitants per unit of `views_per_capita`
    pub scale: f64,
    /// Full normalized table; z-scores are relative to all of it
    pub metrics: Vec<EngagementMetric>,
    pub selection: Selection,
    /// Display projection of `metrics`
    pub view: Vec<EngagementMetric>,
    /// Views per country for the selected year, highest first
    pub country_totals: Vec<CountryYearAggregate>,
    pub ranking: Option<CountryRanking>,
}

/// Run the full pipeline and assemble a report.
///
/// # Errors
///
/// Any stage error, plus [`Error::EmptyResult`] when the requested year is
/// absent from the table or the requested country has no rows that year.
pub fn build_report(
    table: &RecordTable,
    request: &ReportRequest,
    config: &EngagemapConfig,
) -> Result<EngagementReport> {
    let span = info_span!("build_report", records = table.len());
    let _enter = span.enter();

    let years = table.years()?;
    if let Some(year) = &request.year {
        if !years.contains(year) {
            return Err(Error::empty_result(format!("year={}", year)));
        }
    }

    let records = table.records();

    let aggregates = {
        let _phase = set_phase(PipelinePhase::Aggregation);
        aggregate_region_views(records).inspect_err(log_failure)?
    };
    let populations = {
        let _phase = set_phase(PipelinePhase::Reconciliation);
        reconcile_population_with(records, config.dedup_strategy()).inspect_err(log_failure)?
    };
    let normalization = config.normalization();
    let metrics = {
        let _phase = set_phase(PipelinePhase::Normalization);
        normalize_with(&aggregates, &populations, &normalization)
            .inspect_err(log_failure)?
    };
    debug!(
        aggregates = aggregates.len(),
        populations = populations.len(),
        metrics = metrics.len(),
        "Normalized engagement metrics"
    );

    let (view, country_totals) = {
        let _phase = set_phase(PipelinePhase::Projection);
        let view = project_metrics(&metrics, request.year.as_ref(), &request.regions);
        let countries = select_country_totals(aggregate_country_views(records)?, request.year.as_ref());
        (view, countries)
    };

    let ranking = match &request.country {
        Some(country) => {
            let _phase = set_phase(PipelinePhase::Ranking);
            let year = request.year.clone().ok_or_else(|| {
                Error::Configuration("ranking a country requires a year".to_string())
            })?;
            let n = request.top.unwrap_or_else(|| config.top_n());
            let articles = top_articles(records, country, &year, n).inspect_err(log_failure)?;
            Some(CountryRanking {
                country: country.clone(),
                year,
                articles,
            })
        }
        None => None,
    };

    info!(
        rows = view.len(),
        ranked = ranking.as_ref().map_or(0, |r| r.articles.len()),
        "Report ready"
    );

    Ok(EngagementReport {
        generated_at: Utc::now(),
        source: request.source.clone(),
        record_count: table.len(),
        years,
        scale: normalization.scale,
        metrics,
        selection: Selection {
            year: request.year.clone(),
            regions: request.regions.clone(),
        },
        view,
        country_totals,
        ranking,
    })
}

fn log_failure(err: &Error) {
    let phase = current_phase().map_or_else(|| "unknown".to_string(), |p| p.to_string());
    debug!(%phase, code = err.code(), "Stage failed: {}", err);
}

/// Keep one year (if given) and order by views, highest first.
fn select_country_totals(
    totals: Vec<CountryYearAggregate>,
    year: Option<&Year>,
) -> Vec<CountryYearAggregate> {
    let mut selected: Vec<CountryYearAggregate> = totals
        .into_iter()
        .filter(|c| year.is_none_or(|y| &c.year == y))
        .collect();
    selected.sort_by(|a, b| b.total_views.cmp(&a.total_views));
    selected
}
