use crate::core::EngagementMetric;
use crate::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter};
use crate::io::output::{group_digits, regions_label, scale_label, OutputWriter};
use crate::pipeline::{CountryRanking, EngagementReport};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;

const MAX_COUNTRY_ROWS: usize = 10;

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatting: FormattingConfig,
    formatter: ColoredFormatter,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatting,
            formatter: ColoredFormatter::new(formatting),
        }
    }

    fn new_table(&self, header: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header.to_vec());
        if self.formatting.color.should_use_color() {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn write_summary(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.header("PAGEVIEW ENGAGEMENT")
        )?;
        if let Some(source) = &report.source {
            writeln!(self.writer, "{}", self.formatter.dim(source))?;
        }
        let years = report
            .years
            .iter()
            .map(|y| y.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            self.writer,
            "{} records, years: {}",
            report.record_count, years
        )?;
        writeln!(
            self.writer,
            "Selection: year {}, regions {}",
            report
                .selection
                .year
                .as_ref()
                .map_or_else(|| "all".to_string(), |y| y.to_string()),
            regions_label(report)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_engagement(&mut self, rows: &[EngagementMetric], scale: f64) -> anyhow::Result<()> {
        let unit = scale_label(scale);
        writeln!(
            self.writer,
            "{}",
            self.formatter
                .bold(&format!("Pageviews per capita (per {} inhabitants)", unit))
        )?;
        if rows.is_empty() {
            writeln!(self.writer, "No region matches the selection.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let rate_header = format!("Views / {}", unit);
        let mut table = self.new_table(&[
            "Region",
            "Year",
            "Views",
            "Population",
            rate_header.as_str(),
            "Z-score",
        ]);
        for m in rows {
            let z = Cell::new(format!("{:+.2}", m.views_zscore)).set_alignment(CellAlignment::Right);
            let z = if m.views_zscore > 0.0 {
                z.fg(Color::Green)
            } else if m.views_zscore < 0.0 {
                z.fg(Color::Red)
            } else {
                z
            };
            table.add_row(vec![
                Cell::new(m.region),
                Cell::new(&m.year),
                right(group_digits(m.total_views as f64)),
                right(group_digits(m.population)),
                right(format!("{:.2}", m.views_per_capita)),
                z,
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_country_totals(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
        if report.country_totals.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", self.formatter.bold("Most viewed countries"))?;
        let mut table = self.new_table(&["Country", "Year", "Views"]);
        for c in report.country_totals.iter().take(MAX_COUNTRY_ROWS) {
            table.add_row(vec![
                Cell::new(&c.country),
                Cell::new(&c.year),
                right(group_digits(c.total_views as f64)),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_ranking_section(&mut self, ranking: &CountryRanking) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.bold(&format!(
                "Top {} articles in {} ({})",
                ranking.articles.len(),
                ranking.country,
                ranking.year
            ))
        )?;
        let mut table = self.new_table(&["#", "Article", "Views"]);
        for (i, a) in ranking.articles.iter().enumerate() {
            table.add_row(vec![
                right((i + 1).to_string()),
                Cell::new(&a.article),
                right(group_digits(a.views as f64)),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &EngagementReport) -> anyhow::Result<()> {
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
