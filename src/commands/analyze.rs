use super::{load_table, open_destination, resolve_format, resolve_formatting};
use crate::config::{Deviation, EngagemapConfig, NormalizationConfig, PopulationConfig};
use crate::core::{Region, Year};
use crate::formatting::FormattingConfig;
use crate::io::{create_writer, OutputFormat};
use crate::observability::{set_phase, PipelinePhase};
use crate::pipeline::{build_report, DedupStrategy, ReportRequest};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub year: Option<String>,
    pub regions: Option<Vec<Region>>,
    pub country: Option<String>,
    pub top: Option<usize>,
    pub strategy: Option<DedupStrategy>,
    pub deviation: Option<Deviation>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub formatting_config: FormattingConfig,
}

pub fn handle_analyze(config: AnalyzeConfig, settings: EngagemapConfig) -> Result<()> {
    let settings = apply_overrides(settings, config.strategy, config.deviation);
    let table = load_table(&config.path)?;

    let request = ReportRequest {
        year: config.year.as_deref().map(Year::from),
        regions: config
            .regions
            .clone()
            .unwrap_or_else(|| settings.display().regions),
        country: config.country.clone(),
        top: config.top,
        source: Some(config.path.display().to_string()),
    };
    let report = build_report(&table, &request, &settings)
        .with_context(|| format!("Failed to analyze {}", config.path.display()))?;

    let format = resolve_format(config.format, &settings);
    let formatting = resolve_formatting(config.output.as_deref(), config.formatting_config);
    let mut writer = create_writer(format, open_destination(config.output.as_deref())?, formatting);

    let _phase = set_phase(PipelinePhase::OutputGeneration);
    writer.write_report(&report)?;
    if let Some(path) = &config.output {
        tracing::info!(path = %path.display(), "Report written");
    }
    Ok(())
}

/// Command-line flags take precedence over the config file.
pub(crate) fn apply_overrides(
    mut settings: EngagemapConfig,
    strategy: Option<DedupStrategy>,
    deviation: Option<Deviation>,
) -> EngagemapConfig {
    if let Some(strategy) = strategy {
        settings.population = Some(PopulationConfig { strategy });
    }
    if let Some(deviation) = deviation {
        settings.normalization = Some(NormalizationConfig {
            deviation,
            ..settings.normalization()
        });
    }
    settings
}
