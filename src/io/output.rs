use crate::formatting::FormattingConfig;
use crate::pipeline::{CountryRanking, EngagementReport};
use std::io::Write;

use super::writers::{JsonWriter, MarkdownWriter, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "terminal" | "text" => Some(Self::Terminal),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &EngagementReport) -> anyhow::Result<()>;
    fn write_ranking(&mut self, ranking: &CountryRanking) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

/// Thousands-separated integer, e.g. `50,000,000`.
pub(crate) fn group_digits(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// Human label for the region selection; empty means all regions.
pub(crate) fn regions_label(report: &EngagementReport) -> String {
    if report.selection.regions.is_empty() {
        "all".to_string()
    } else {
        report
            .selection
            .regions
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
/// Short label for a rate scale: `1M`, `1K`, `100K`, otherwise grouped digits.
pub(crate) fn scale_label(scale: f64) -> String {
    let units = [(1_000_000_000.0, "B"), (1_000_000.0, "M"), (1_000.0, "K")];
    for (unit, suffix) in units {
        let count = scale / unit;
        if count >= 1.0 && count.fract() == 0.0 {
            return format!("{}{}", count, suffix);
        }
    }
    if scale.fract() == 0.0 {
        group_digits(scale)
    } else {
        scale.to_string()
    }
}
