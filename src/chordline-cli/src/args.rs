//! CLI argument structures and parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// How much of the resolution engine's tracing reaches stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Rejected config entries and failed registrations only
    Error,
    /// Also replaced bindings and notifications (default)
    #[default]
    Warn,
    /// Also notifications sent at info level
    Info,
    /// Also every binding, command and completion decision
    Debug,
    /// Also every buffer mutation and key translation
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Read a level from `CHORDLINE_LOG`, ignoring case and surrounding space.
    pub fn from_env_value(value: &str) -> Option<LogLevel> {
        <LogLevel as clap::ValueEnum>::from_str(value.trim(), true)
            .ok()
            .or_else(|| value.trim().eq_ignore_ascii_case("warning").then_some(LogLevel::Warn))
    }
}

/// Replay key and command line scripts against a chordline session.
#[derive(Debug, Parser)]
#[command(name = "chordline", version, about)]
pub struct Cli {
    /// Log level (overridden by CHORDLINE_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::default(), global = true)]
    pub log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a script of key, line and tab events
    Run(RunArgs),
    /// Parse key specs and print their canonical form
    Keys(KeysArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Script file; standard input when omitted
    pub script: Option<PathBuf>,

    /// TOML file with [settings] and [[map]] entries
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the input buffer after every event
    #[arg(long)]
    pub show_buffer: bool,
}

#[derive(Debug, Args)]
pub struct KeysArgs {
    /// Key specs such as `j`, `gt`, `<C-d>` or `<S-Tab>`
    #[arg(required = true)]
    pub specs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!(LogLevel::Error.directive(), "error");
        assert_eq!(LogLevel::Trace.directive(), "trace");
    }

    #[test]
    fn test_log_level_from_env_value() {
        assert_eq!(LogLevel::from_env_value("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_env_value(" Debug "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_env_value("loud"), None);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "chordline",
            "--log-level",
            "debug",
            "run",
            "script.txt",
            "--config",
            "chordline.toml",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.script, Some(PathBuf::from("script.txt")));
                assert_eq!(args.config, Some(PathBuf::from("chordline.toml")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
