//! Shared error types for the engagement pipeline

use crate::core::{Region, Year};
use thiserror::Error;

/// Main error type for engagemap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input table is missing one or more required columns
    #[error("Schema error: missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A row could not be converted into a typed record
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    /// A date value has no year component
    #[error("Malformed date '{date}': expected an ISO date such as 2023-01-31")]
    MalformedDate { date: String },

    /// Per-capita rate requested for a zero population
    #[error("Division by zero: population for {region} {year} is 0")]
    DivisionByZero { region: Region, year: Year },

    /// Population is negative or not a finite number
    #[error("Invalid population for {region} {year}: {population}")]
    InvalidPopulation {
        region: Region,
        year: Year,
        population: f64,
    },

    /// Two records disagree on the population of a country in a year
    #[error("Conflicting population for {country} {year}: {first} vs {conflicting}")]
    PopulationConflict {
        country: String,
        year: Year,
        first: f64,
        conflicting: f64,
    },

    /// Summed views do not fit in an `i64`
    #[error("View total for {key} overflows a 64-bit integer")]
    ViewOverflow { key: String },

    /// A filter combination matched no rows
    #[error("No rows match {filter}")]
    EmptyResult { filter: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV decoding errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            message: message.into(),
        }
    }

    pub fn malformed_date(date: impl Into<String>) -> Self {
        Self::MalformedDate { date: date.into() }
    }

    pub fn view_overflow(key: impl Into<String>) -> Self {
        Self::ViewOverflow { key: key.into() }
    }

    pub fn empty_result(filter: impl Into<String>) -> Self {
        Self::EmptyResult {
            filter: filter.into(),
        }
    }

    /// Stable error code for documentation and programmatic handling.
    ///
    /// - E001-E009: input and I/O
    /// - E010-E019: pipeline arithmetic and reconciliation
    /// - E020-E029: filters and configuration
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E001",
            Self::Csv(_) => "E002",
            Self::Schema { .. } => "E003",
            Self::InvalidRecord { .. } => "E004",
            Self::MalformedDate { .. } => "E005",
            Self::DivisionByZero { .. } => "E010",
            Self::InvalidPopulation { .. } => "E011",
            Self::PopulationConflict { .. } => "E012",
            Self::ViewOverflow { .. } => "E013",
            Self::EmptyResult { .. } => "E020",
            Self::Configuration(_) => "E021",
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
