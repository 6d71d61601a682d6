// Sub-modules
mod core;
mod display;
mod loader;
mod normalization;

pub use self::core::{default_top, EngagemapConfig, PopulationConfig, RankingConfig};
pub use display::DisplayConfig;
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
pub use normalization::{default_scale, Deviation, NormalizationConfig};
