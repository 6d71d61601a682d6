use crate::core::Region;
use serde::{Deserialize, Serialize};

/// Display configuration for report output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Regions shown when `--regions` is not given (empty: all)
    #[serde(default)]
    pub regions: Vec<Region>,

    /// Default output format (terminal, markdown, json)
    #[serde(default)]
    pub format: Option<String>,
}
