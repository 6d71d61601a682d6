use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Deviation;
use crate::core::Region;
use crate::pipeline::DedupStrategy;

#[derive(Parser, Debug)]
#[command(name = "engagemap")]
#[command(about = "Pageview engagement per region and top articles per country", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: info, -vv: debug, -vvv: trace. RUST_LOG overrides this.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-capita engagement per region and year
    Analyze {
        /// CSV file with article, country, region, date, views, population columns
        path: PathBuf,

        /// Year to display (statistics still use every year)
        #[arg(long)]
        year: Option<String>,

        /// Regions to display (comma-separated)
        #[arg(long, value_enum, value_delimiter = ',', ignore_case = true)]
        regions: Option<Vec<RegionArg>>,

        /// Also rank top articles for this country (requires --year)
        #[arg(long, requires = "year")]
        country: Option<String>,

        /// Number of articles to rank
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Population deduplication strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Standard deviation used for z-scores
        #[arg(long, value_enum)]
        deviation: Option<DeviationArg>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// Top articles for one country and year
    Rank {
        /// CSV file with article, country, region, date, views, population columns
        path: PathBuf,

        /// Country to rank
        #[arg(long)]
        country: String,

        /// Year to rank
        #[arg(long)]
        year: String,

        /// Number of articles to rank
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// List the years in a file and the countries present in each
    Years {
        /// CSV file with article, country, region, date, views, population columns
        path: PathBuf,
    },

    /// Initialize a .engagemap.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegionArg {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl From<RegionArg> for Region {
    fn from(r: RegionArg) -> Self {
        match r {
            RegionArg::Africa => Region::Africa,
            RegionArg::Americas => Region::Americas,
            RegionArg::Asia => Region::Asia,
            RegionArg::Europe => Region::Europe,
            RegionArg::Oceania => Region::Oceania,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// First record in file order wins (default)
    FirstSeen,
    /// Last record in file order wins
    Latest,
    /// Largest population wins
    Max,
    /// Fail when a country reports two populations in one year
    ErrorOnConflict,
}

impl From<StrategyArg> for DedupStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::FirstSeen => DedupStrategy::FirstSeen,
            StrategyArg::Latest => DedupStrategy::Latest,
            StrategyArg::Max => DedupStrategy::Max,
            StrategyArg::ErrorOnConflict => DedupStrategy::ErrorOnConflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviationArg {
    /// Divide by n (default)
    Population,
    /// Divide by n - 1
    Sample,
}

impl From<DeviationArg> for Deviation {
    fn from(d: DeviationArg) -> Self {
        match d {
            DeviationArg::Population => Deviation::Population,
            DeviationArg::Sample => Deviation::Sample,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
