//! Chordline CLI - replay key and command line scripts against a session.

mod args;
mod demo;
mod script;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands, KeysArgs, LogLevel, RunArgs};
use chordline_input::{KeySpec, format_chord, parse_key_spec};

fn init_logging(cli: &Cli) {
    let log_level = match std::env::var("CHORDLINE_LOG") {
        Ok(env_level) => LogLevel::from_env_value(&env_level).unwrap_or(cli.log_level),
        Err(_) => cli.log_level,
    };

    // RUST_LOG wins when it parses; otherwise scope our crates to the chosen level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,chordline={level},chordline_core={level},chordline_input={level}",
            level = log_level.directive()
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: RunArgs) -> Result<()> {
    let transcript = demo::Transcript::default();
    let mut session = demo::build_session(&transcript)?;

    if let Some(path) = &args.config {
        let rejected = session
            .load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        for error in rejected {
            eprintln!("config: {error}");
        }
    }

    let text = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            text
        }
    };

    for line in script::run_script(&mut session, &text, &transcript, args.show_buffer)? {
        println!("{line}");
    }
    Ok(())
}

fn keys(args: KeysArgs) -> Result<()> {
    for spec in &args.specs {
        match parse_key_spec(spec).with_context(|| format!("invalid key spec '{spec}'"))? {
            KeySpec::Chord(chord) => println!("{spec}\t{}", format_chord(&chord)),
            KeySpec::Buffered(keys) => println!("{spec}\tbuffered {keys}"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Keys(args) => keys(args),
    }
}
