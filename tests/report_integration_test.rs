//! Loader-to-report integration tests

mod common;

use common::SAMPLE_CSV;
use engagemap::{
    build_report, DedupStrategy, Deviation, EngagemapConfig, Error, NormalizationConfig,
    RecordTable, Region, ReportRequest, Year,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn load_sample() -> RecordTable {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pageviews.csv");
    fs::write(&path, SAMPLE_CSV).unwrap();
    RecordTable::from_path(&path).unwrap()
}

#[test]
fn test_worked_example_from_csv() {
    let table = load_sample();
    let request = ReportRequest {
        year: Some(Year::from("2023")),
        regions: vec![Region::Africa],
        country: Some("Kenya".to_string()),
        ..Default::default()
    };

    let report = build_report(&table, &request, &EngagemapConfig::default()).unwrap();

    assert_eq!(report.record_count, 5);
    assert_eq!(report.view.len(), 1);
    assert_eq!(report.view[0].total_views, 3000);
    assert_eq!(report.view[0].population, 50_000_000.0);
    assert!((report.view[0].views_per_capita - 60.0).abs() < 1e-9);

    let ranked: Vec<(&str, i64)> = report
        .ranking
        .as_ref()
        .unwrap()
        .articles
        .iter()
        .map(|a| (a.article.as_str(), a.views))
        .collect();
    assert_eq!(ranked, vec![("Safari", 2000), ("Nairobi", 1000)]);
}

#[test]
fn test_zscores_use_full_table_regardless_of_selection() {
    let table = load_sample();
    let config = EngagemapConfig::default();

    let all = build_report(&table, &ReportRequest::default(), &config).unwrap();
    let narrowed = build_report(
        &table,
        &ReportRequest {
            year: Some(Year::from("2024")),
            regions: vec![Region::Europe],
            ..Default::default()
        },
        &config,
    )
    .unwrap();

    let europe = all
        .metrics
        .iter()
        .find(|m| m.region == Region::Europe)
        .unwrap();
    assert_eq!(narrowed.view, vec![europe.clone()]);
    assert_eq!(narrowed.metrics, all.metrics);
}

#[test]
fn test_sample_deviation_config() {
    let table = load_sample();
    let config = EngagemapConfig {
        normalization: Some(NormalizationConfig {
            deviation: Deviation::Sample,
            ..Default::default()
        }),
        ..Default::default()
    };

    let population = build_report(&table, &ReportRequest::default(), &EngagemapConfig::default())
        .unwrap();
    let sample = build_report(&table, &ReportRequest::default(), &config).unwrap();

    // Bessel correction widens the deviation, shrinking every score
    for (p, s) in population.metrics.iter().zip(sample.metrics.iter()) {
        assert!(s.views_zscore.abs() <= p.views_zscore.abs());
    }
}

#[test]
fn test_conflicting_population_with_strict_strategy() {
    let csv = "\
article,country,region,date,views,population
A,Kenya,Africa,2023-01-01,1,50000000
B,Kenya,Africa,2023-01-02,1,51000000
";
    let table = RecordTable::from_reader(csv.as_bytes()).unwrap();
    let config = EngagemapConfig {
        population: Some(engagemap::config::PopulationConfig {
            strategy: DedupStrategy::ErrorOnConflict,
        }),
        ..Default::default()
    };

    let err = build_report(&table, &ReportRequest::default(), &config).unwrap_err();
    assert!(matches!(err, Error::PopulationConflict { .. }));

    let lenient = build_report(&table, &ReportRequest::default(), &EngagemapConfig::default())
        .unwrap();
    assert_eq!(lenient.metrics[0].population, 50_000_000.0);
}

#[test]
fn test_zero_population_is_reported() {
    let csv = "\
article,country,region,date,views,population
A,Nowhere,Oceania,2023-01-01,10,0
";
    let table = RecordTable::from_reader(csv.as_bytes()).unwrap();

    let err = build_report(&table, &ReportRequest::default(), &EngagemapConfig::default())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::DivisionByZero {
            region: Region::Oceania,
            ..
        }
    ));
}

#[test]
fn test_malformed_date_is_reported() {
    let csv = "\
article,country,region,date,views,population
A,Kenya,Africa,20230101,10,5
";
    let table = RecordTable::from_reader(csv.as_bytes()).unwrap();

    let err = build_report(&table, &ReportRequest::default(), &EngagemapConfig::default())
        .unwrap_err();

    assert!(matches!(err, Error::MalformedDate { .. }));
}
