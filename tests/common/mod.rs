// Shared fixtures for engagemap integration tests
#![allow(dead_code)]

use engagemap::{RawRecord, Region};

/// (country, region, population in 2023)
pub const COUNTRIES: [(&str, Region, f64); 6] = [
    ("Kenya", Region::Africa, 54_000_000.0),
    ("Chad", Region::Africa, 17_700_000.0),
    ("Peru", Region::Americas, 34_000_000.0),
    ("Japan", Region::Asia, 124_500_000.0),
    ("France", Region::Europe, 68_100_000.0),
    ("Fiji", Region::Oceania, 930_000.0),
];

pub const YEARS: [&str; 2] = ["2023", "2024"];

pub const ARTICLES: [&str; 5] = [
    "Nairobi",
    "Lake Chad",
    "Machu Picchu",
    "Mount Fuji",
    "Great Barrier Reef",
];

/// Population of a country in a year; stable for the same inputs.
pub fn population(country_idx: usize, year_idx: usize) -> f64 {
    COUNTRIES[country_idx].2 * (1.0 + 0.01 * year_idx as f64)
}

/// Build a record from fixture indices.
pub fn record(article_idx: usize, country_idx: usize, year_idx: usize, day: u32, views: i64) -> RawRecord {
    let (country, region, _) = COUNTRIES[country_idx];
    RawRecord::new(
        ARTICLES[article_idx],
        country,
        region,
        format!("{}-01-{:02}", YEARS[year_idx], day),
        views,
        population(country_idx, year_idx),
    )
}

pub const SAMPLE_CSV: &str = "\
article,country,region,date,views,population
Nairobi,Kenya,Africa,2023-01-01,1000,50000000
Safari,Kenya,Africa,2023-01-02,2000,50000000
Mount Fuji,Japan,Asia,2023-01-01,500,125000000
Mount Fuji,Japan,Asia,2024-01-01,900,124000000
Eiffel Tower,France,Europe,2024-01-01,4000,68000000
";
