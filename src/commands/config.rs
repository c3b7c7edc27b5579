use anyhow::Result;
use calpost_core::CalpostConfig;

pub fn run(config: &CalpostConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
