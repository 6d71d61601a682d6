use serde::{Deserialize, Serialize};

use super::display::DisplayConfig;
use super::normalization::NormalizationConfig;
use crate::pipeline::stages::population::DedupStrategy;
use crate::pipeline::stages::ranking::DEFAULT_TOP_N;

/// Root configuration structure for engagemap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagemapConfig {
    /// Population reconciliation configuration
    #[serde(default)]
    pub population: Option<PopulationConfig>,

    /// Top-article ranking configuration
    #[serde(default)]
    pub ranking: Option<RankingConfig>,

    /// Per-capita normalization configuration
    #[serde(default)]
    pub normalization: Option<NormalizationConfig>,

    /// Display configuration for output formatting
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Tie-break for repeated (country, year) population values
    #[serde(default)]
    pub strategy: DedupStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Number of articles to rank (default: 25)
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top: default_top() }
    }
}

pub fn default_top() -> usize {
    DEFAULT_TOP_N
}

impl EngagemapConfig {
    pub fn dedup_strategy(&self) -> DedupStrategy {
        self.population.unwrap_or_default().strategy
    }

    pub fn top_n(&self) -> usize {
        self.ranking.unwrap_or_default().top
    }

    pub fn normalization(&self) -> NormalizationConfig {
        self.normalization.unwrap_or_default()
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }
}
