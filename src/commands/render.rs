use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Result;
use calpost_core::output::{review_block, write_payloads};
use calpost_core::pipeline::{self, InputSource, RunMode};
use calpost_core::CalpostConfig;
use chrono::{Local, NaiveDate};

pub struct RenderArgs {
    pub events: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub automated: bool,
    pub interactive: bool,
}

impl RenderArgs {
    /// Piped input means an automated run unless a flag says otherwise.
    fn mode(&self, stdin_piped: bool) -> RunMode {
        if self.automated || (stdin_piped && !self.interactive) {
            RunMode::Automated
        } else {
            RunMode::Interactive
        }
    }
}

pub fn run(config: &CalpostConfig, args: RenderArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdin_piped = !stdin.is_terminal();

    let source = if stdin_piped {
        InputSource::Piped(stdin.lock())
    } else {
        InputSource::File(
            args.events
                .clone()
                .unwrap_or_else(|| config.events_path.clone()),
        )
    };

    let report = execute(config, &args, source, stdin_piped, Local::now().date_naive())?;
    println!("{}", report);

    Ok(())
}

/// Run the pipeline and deliver the messages. Returns what to print.
fn execute<R: Read>(
    config: &CalpostConfig,
    args: &RenderArgs,
    source: InputSource<R>,
    stdin_piped: bool,
    today: NaiveDate,
) -> Result<String> {
    let mode = args.mode(stdin_piped);
    log::info!("Running in {:?} mode", mode);

    let preface = pipeline::load_preface(&config.preface_path, &config.default_preface);
    let events = pipeline::load_events(source, &config.online_location)?;
    let messages = pipeline::render(config, events, &preface, mode, today);

    match mode {
        RunMode::Automated => {
            let written = write_payloads(&messages, &config.output, &args.out_dir)?;
            let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            Ok(format!("Messages written to {}", names.join(", ")))
        }
        RunMode::Interactive => Ok(review_block(&messages)),
    }
}
