use serde::{Deserialize, Serialize};

/// Divisor used for the standard deviation behind z-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Deviation {
    /// Divide by n
    #[default]
    Population,
    /// Divide by n - 1 (Bessel-corrected)
    Sample,
}

/// Per-capita normalization settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Rate is expressed per this many inhabitants (default: 1,000,000)
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Standard deviation kind for z-scores (default: population)
    #[serde(default)]
    pub deviation: Deviation,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            deviation: Deviation::default(),
        }
    }
}

impl NormalizationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(format!(
                "normalization.scale must be a positive number, got {}",
                self.scale
            ));
        }
        Ok(())
    }
}

pub fn default_scale() -> f64 {
    1_000_000.0
}
