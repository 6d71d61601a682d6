//! CLI command implementations.
//!
//! Available commands:
//! - **analyze**: per-capita engagement per region and year
//! - **rank**: top articles for one country and year
//! - **years**: years and countries present in a file
//! - **init**: write a default `.engagemap.toml`
//!
//! File I/O happens here; everything in between is the pure pipeline.

pub mod analyze;
pub mod init;
pub mod rank;
pub mod years;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use rank::{handle_rank, RankConfig};
pub use years::handle_years;

use crate::config::EngagemapConfig;
use crate::formatting::FormattingConfig;
use crate::io::OutputFormat;
use crate::loader::RecordTable;
use crate::observability::{set_phase, PipelinePhase};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub(crate) fn load_table(path: &Path) -> Result<RecordTable> {
    let _phase = set_phase(PipelinePhase::Loading);
    RecordTable::from_path(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Stdout, or a buffered file when `output` is given.
pub(crate) fn open_destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Flag wins over `[display] format`, which wins over terminal output.
pub(crate) fn resolve_format(flag: Option<OutputFormat>, settings: &EngagemapConfig) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }
    match settings.display().format.as_deref() {
        Some(name) => OutputFormat::parse(name).unwrap_or_else(|| {
            tracing::warn!(format = name, "Unknown display.format in config, using terminal");
            OutputFormat::Terminal
        }),
        None => OutputFormat::Terminal,
    }
}

/// Files never receive color codes.
pub(crate) fn resolve_formatting(output: Option<&Path>, requested: FormattingConfig) -> FormattingConfig {
    if output.is_some() {
        FormattingConfig::plain()
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;

    #[test]
    fn test_resolve_format_precedence() {
        let settings = parse_and_validate_config("[display]\nformat = \"json\"\n").unwrap();

        assert_eq!(
            resolve_format(Some(OutputFormat::Markdown), &settings),
            OutputFormat::Markdown
        );
        assert_eq!(resolve_format(None, &settings), OutputFormat::Json);
        assert_eq!(
            resolve_format(None, &EngagemapConfig::default()),
            OutputFormat::Terminal
        );
    }

    #[test]
    fn test_files_get_plain_formatting() {
        let formatting = resolve_formatting(Some(Path::new("out.txt")), FormattingConfig::default());
        assert_eq!(formatting, FormattingConfig::plain());
    }
}
