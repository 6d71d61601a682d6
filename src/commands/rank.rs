use super::{load_table, open_destination, resolve_format, resolve_formatting};
use crate::config::EngagemapConfig;
use crate::core::Year;
use crate::formatting::FormattingConfig;
use crate::io::{create_writer, OutputFormat};
use crate::observability::{set_phase, PipelinePhase};
use crate::pipeline::{top_articles, CountryRanking};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct RankConfig {
    pub path: PathBuf,
    pub country: String,
    pub year: String,
    pub top: Option<usize>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub formatting_config: FormattingConfig,
}

pub fn handle_rank(config: RankConfig, settings: EngagemapConfig) -> Result<()> {
    let table = load_table(&config.path)?;
    let year = Year::from(config.year.as_str());
    let n = config.top.unwrap_or_else(|| settings.top_n());

    let articles = {
        let _phase = set_phase(PipelinePhase::Ranking);
        top_articles(table.records(), &config.country, &year, n).with_context(|| {
            format!("Failed to rank articles in {}", config.path.display())
        })?
    };
    let ranking = CountryRanking {
        country: config.country.clone(),
        year,
        articles,
    };

    let format = resolve_format(config.format, &settings);
    let formatting = resolve_formatting(config.output.as_deref(), config.formatting_config);
    let mut writer = create_writer(format, open_destination(config.output.as_deref())?, formatting);

    let _phase = set_phase(PipelinePhase::OutputGeneration);
    writer.write_ranking(&ranking)
}
