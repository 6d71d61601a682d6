use super::load_table;
use anyhow::Result;
use std::path::Path;

/// Print each year in the file with the countries present in it.
pub fn handle_years(path: &Path) -> Result<()> {
    let table = load_table(path)?;
    for year in table.years()? {
        let countries = table.countries_for_year(&year)?;
        println!("{} ({} countries)", year, countries.len());
        for country in countries {
            println!("  {}", country);
        }
    }
    Ok(())
}
