use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = r#"# Engagemap Configuration

[population]
# first-seen, latest, max, error-on-conflict
strategy = "first-seen"

[ranking]
top = 25

[normalization]
# rate per this many inhabitants
scale = 1000000.0
# population (divide by n) or sample (divide by n - 1)
deviation = "population"

[display]
regions = ["Africa", "Americas", "Asia", "Europe", "Oceania"]
format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
