use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use calpost_core::ics::convert_feed;
use calpost_core::records::{write_rows, write_rows_string};
use calpost_core::CalpostConfig;

pub fn run(config: &CalpostConfig, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("No ICS input: pass a file or pipe a feed into stdin");
            }
            let mut content = String::new();
            stdin.read_to_string(&mut content)?;
            content
        }
    };

    let rows = convert_feed(&content, &config.import)?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_rows(file, &rows)?;
            println!("Wrote {} events to {}", rows.len(), path.display());
        }
        None => print!("{}", write_rows_string(&rows)?),
    }

    Ok(())
}
