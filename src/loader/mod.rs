//! Record loading at the edge of the pipeline.
//!
//! CSV input is validated once here: the header row must carry every
//! required column and every row must convert into a typed [`RawRecord`].
//! Past this point the pipeline never sees loosely-typed data.

use crate::core::{Error, RawRecord, Region, Result, Year};
use crate::pipeline::stages::year::extract_year;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every input table must provide, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["article", "country", "region", "date", "views", "population"];

/// Row shape as it appears on disk, before typing.
#[derive(Debug, Deserialize)]
struct CsvRow {
    article: String,
    country: String,
    region: String,
    date: String,
    views: String,
    population: String,
}

/// Immutable in-memory table of pageview records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    records: Vec<RawRecord>,
}

impl RecordTable {
    /// Wrap already-typed records. No validation is performed.
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "Loading pageview records");
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        check_required_columns(&headers)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let parsed: CsvRow = row
                .deserialize(Some(&headers))
                .map_err(|e| Error::invalid_record(line, e.to_string()))?;
            records.push(convert_row(parsed, line)?);
        }

        tracing::debug!(rows = records.len(), "Parsed pageview records");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct year labels present in the table, sorted.
    pub fn years(&self) -> Result<Vec<Year>> {
        let years = self
            .records
            .iter()
            .map(|r| extract_year(&r.date))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(years.into_iter().collect())
    }

    /// Distinct countries with at least one record in `year`, sorted.
    pub fn countries_for_year(&self, year: &Year) -> Result<Vec<String>> {
        let mut countries = BTreeSet::new();
        for record in &self.records {
            if &extract_year(&record.date)? == year {
                countries.insert(record.country.clone());
            }
        }
        Ok(countries.into_iter().collect())
    }
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::schema(missing))
    }
}

fn convert_row(row: CsvRow, line: u64) -> Result<RawRecord> {
    let region: Region = row
        .region
        .parse()
        .map_err(|e: String| Error::invalid_record(line, e))?;
    let views = parse_views(&row.views).map_err(|e| Error::invalid_record(line, e))?;
    let population =
        parse_population(&row.population).map_err(|e| Error::invalid_record(line, e))?;

    Ok(RawRecord {
        article: row.article,
        country: row.country,
        region,
        date: row.date,
        views,
        population,
    })
}

/// Parse a view count. Whole-valued floats such as `1200.0` are accepted.
fn parse_views(raw: &str) -> std::result::Result<i64, String> {
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    // 2^63 is exactly representable; i64::MAX as f64 rounds up to it
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v >= -BOUND && v < BOUND => Ok(v as i64),
        Ok(v) if v.is_finite() && v.fract() == 0.0 => {
            Err(format!("views '{}' is outside the 64-bit integer range", raw))
        }
        _ => Err(format!("views '{}' is not a whole number", raw)),
    }
}

fn parse_population(raw: &str) -> std::result::Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        Ok(p) => Err(format!("population {} must be a non-negative number", p)),
        Err(_) => Err(format!("population '{}' is not a number", raw)),
    }
}
