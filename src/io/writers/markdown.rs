use crate::core::EngagementMetric;
use crate::io::output::{group_digits, regions_label, scale_label, OutputWriter};
use crate::pipeline::{CountryRanking, EngagementReport};
use std::io::Write;

/// Country totals listed in the Markdown report.
const MAX_COUNTRY_ROWS: usize = 10;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_engagement(&report.view, report.scale)?;
        self.write_country_totals(report)?;
        if let Some(ranking) = &report.ranking {
            self.write_ranking_section(ranking)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_ranking(&mut self, ranking: &CountryRanking) -> anyhow::Result<()> {
        self.write_ranking_section(ranking)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Pageview Engagement Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(source) = &report.source {
            writeln!(self.writer, "Source: `{}`", source)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
        let years = report
            .years
            .iter()
            .map(|y| y.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let selected_year = report
            .selection
            .year
            .as_ref()
            .map_or_else(|| "all".to_string(), |y| y.to_string());

        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Records | {} |", report.record_count)?;
        writeln!(self.writer, "| Years in data | {} |", years)?;
        writeln!(self.writer, "| Selected year | {} |", selected_year)?;
        writeln!(self.writer, "| Selected regions | {} |", regions_label(report))?;
        writeln!(self.writer, "| Region-year rows | {} |", report.metrics.len())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_engagement(&mut self, rows: &[EngagementMetric], scale: f64) -> anyhow::Result<()> {
        writeln!(self.writer, "## Pageviews Per Capita")?;
        writeln!(self.writer)?;
        if rows.is_empty() {
            writeln!(self.writer, "_No region matches the selection._")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "| Region | Year | Views | Population | Views per {} | Z-score |",
            scale_label(scale)
        )?;
        writeln!(
            self.writer,
            "|--------|------|------:|-----------:|-------------:|--------:|"
        )?;
        for m in rows {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {:.2} | {:+.2} |",
                m.region,
                m.year,
                group_digits(m.total_views as f64),
                group_digits(m.population),
                m.views_per_capita,
                m.views_zscore
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_country_totals(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
        if report.country_totals.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Most Viewed Countries")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Country | Year | Views |")?;
        writeln!(self.writer, "|---------|------|------:|")?;
        for c in report.country_totals.iter().take(MAX_COUNTRY_ROWS) {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                escape_cell(&c.country),
                c.year,
                group_digits(c.total_views as f64)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_ranking_section(&mut self, ranking: &CountryRanking) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "## Top {} Articles: {} ({})",
            ranking.articles.len(),
            ranking.country,
            ranking.year
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Article | Views |")?;
        writeln!(self.writer, "|--:|---------|------:|")?;
        for (i, a) in ranking.articles.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                i + 1,
                escape_cell(&a.article),
                group_digits(a.views as f64)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
