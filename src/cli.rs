// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskgraph-explorer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskgraph-explorer",
    version,
    about = "Lay out an engine's task graph and print positioned frames as JSON.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Explorer.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Engine base URL; overrides `[server].url`.
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Fetch once, wait for the layout to converge, print the final frame
    /// and exit.
    #[arg(long)]
    pub once: bool,

    /// Fetch and validate the graph, print a summary, don't lay it out.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EXPLORER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = CliArgs::try_parse_from([
            "taskgraph-explorer",
            "--server",
            "http://engine:5000",
            "--once",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.server.as_deref(), Some("http://engine:5000"));
        assert!(args.once);
        assert!(!args.dry_run);
        assert!(args.config.is_none());
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }
}
