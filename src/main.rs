mod cli;
mod settings;

use crate::cli::{Command, Invocation, Options};
use crate::settings::Settings;
use anyhow::Context;
use env_logger::{Builder, Env};
use fbref_api::{FbrefScraper, Record, WebClient};
use log::{LevelFilter, debug};
use serde_json::Value;
use std::fs;

fn main() -> anyhow::Result<()> {
    let invocation = match cli::parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}\n\n{}", cli::usage_text());
            std::process::exit(2);
        }
    };

    match invocation.command {
        Command::Help => {
            println!("{}", cli::usage_text());
            return Ok(());
        }
        Command::Version => {
            println!("fbref {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    better_panic::install();
    setup_logger(&invocation.options);

    let settings = Settings::load();
    debug!("client settings: {:?}", settings.client);

    let value = run(&invocation, settings)?;
    write_output(&value, &invocation.options)
}

fn setup_logger(options: &Options) {
    log_builder(options, Env::default().default_filter_or("warn")).init();
}

/// `--verbose` raises the global level to debug even when `RUST_LOG` is set.
fn log_builder(options: &Options, env: Env<'_>) -> Builder {
    let mut builder = Builder::from_env(env);
    if options.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None);
    builder
}

fn run(invocation: &Invocation, settings: Settings) -> anyhow::Result<Value> {
    let scraper = || FbrefScraper::from_config(settings.client.clone());
    let value = match &invocation.command {
        Command::Competitions => serde_json::to_value(FbrefScraper::<WebClient>::competitions())?,
        Command::Fixtures { competition, season } => {
            scraper()?.download_fixtures(competition, season)?.to_value()?
        }
        Command::Summary { match_id } => scraper()?.download_match_summary(match_id)?.to_value()?,
        Command::Shots { match_id } => scraper()?.download_match_shots(match_id)?.to_value()?,
        Command::Report { match_id } => scraper()?.download_match_report(match_id)?.to_value()?,
        command @ (Command::Help | Command::Version) => {
            anyhow::bail!("{command:?} does not fetch anything")
        }
    };
    Ok(value)
}

fn render(value: &Value, options: &Options) -> serde_json::Result<String> {
    if options.compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn write_output(value: &Value, options: &Options) -> anyhow::Result<()> {
    let json = render(value, options)?;

    match &options.output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("could not write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
