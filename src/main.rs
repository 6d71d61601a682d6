use anyhow::Result;
use engagemap::cli::{parse_args, Commands};
use engagemap::commands::{AnalyzeConfig, RankConfig};
use engagemap::formatting::{ColorMode, FormattingConfig};
use engagemap::observability::init_tracing;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = parse_args();
    init_tracing(cli.verbosity);

    run(cli.command).map_err(annotate_error)
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze {
            path,
            year,
            regions,
            country,
            top,
            strategy,
            deviation,
            format,
            output,
            plain,
        } => {
            let config = AnalyzeConfig {
                path,
                year,
                regions: convert_regions(regions),
                country,
                top,
                strategy: strategy.map(Into::into),
                deviation: deviation.map(Into::into),
                format: format.map(Into::into),
                output,
                formatting_config: create_formatting_config(plain),
            };
            engagemap::commands::handle_analyze(config, engagemap::config::load_config())
        }
        Commands::Rank {
            path,
            country,
            year,
            top,
            format,
            output,
            plain,
        } => {
            let config = RankConfig {
                path,
                country,
                year,
                top,
                format: format.map(Into::into),
                output,
                formatting_config: create_formatting_config(plain),
            };
            engagemap::commands::handle_rank(config, engagemap::config::load_config())
        }
        Commands::Years { path } => engagemap::commands::handle_years(&path),
        Commands::Init { force } => engagemap::commands::init::init_config(force),
    }
}

// Pure function to convert region flags; an empty list means all regions
fn convert_regions(
    regions: Option<Vec<engagemap::cli::RegionArg>>,
) -> Option<Vec<engagemap::core::Region>> {
    regions
        .filter(|v| !v.is_empty())
        .map(|v| v.into_iter().map(Into::into).collect())
}

// Pure function to create formatting configuration
fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::new(ColorMode::Never)
    } else {
        FormattingConfig::from_env()
    }
}

// Prefix pipeline failures with their stable error code
fn annotate_error(err: anyhow::Error) -> anyhow::Error {
    match err
        .downcast_ref::<engagemap::core::Error>()
        .map(|e| e.code())
    {
        Some(code) => err.context(format!("engagemap error {}", code)),
        None => err,
    }
}
