//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (resolve, validate, watch), and their associated
//! argument structs. Most flags have an environment variable
//! equivalent.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::trie::TrieKind;

#[derive(Parser)]
#[command(
    name = "routetrie",
    version,
    about = "Prefix-trie route matcher with lock-free hot reload",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        routetrie validate routes.yaml                 Check a route file\n  \
        routetrie resolve -r routes.yaml /users/42     Resolve request paths\n  \
        routetrie watch -r routes.yaml < paths.txt     Resolve stdin, reload on change"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve request paths against a route file
    Resolve(ResolveArgs),

    /// Validate a route file
    Validate(ValidateArgs),

    /// Resolve paths from stdin while hot-reloading the route file
    Watch(WatchArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        routetrie resolve -r routes.yaml /users/42 /orders\n  \
        routetrie resolve -r routes.json --trie radix --json /api/v1")]
pub struct ResolveArgs {
    /// Route file path (.yaml, .json, .toml)
    #[arg(short, long, env = "ROUTES_FILE", default_value = "routes.yaml")]
    pub routes: PathBuf,

    /// Request paths to resolve
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Print one JSON object per path
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub matcher: MatcherArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Route file to validate
    #[arg(default_value = "routes.yaml")]
    pub routes: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        tail -f access.log | cut -d' ' -f7 | routetrie watch -r routes.yaml\n  \
        routetrie watch -r routes.yaml --poll-interval 1 --json")]
pub struct WatchArgs {
    /// Route file path (.yaml, .json, .toml)
    #[arg(short, long, env = "ROUTES_FILE", default_value = "routes.yaml")]
    pub routes: PathBuf,

    /// Route file poll interval in seconds
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 5)]
    pub poll_interval: u64,

    /// Print one JSON object per path
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub matcher: MatcherArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

#[derive(Args)]
pub struct MatcherArgs {
    /// Trie backend used to store routes
    #[arg(long, env = "ROUTETRIE_TRIE", default_value_t = TrieKind::HashMap)]
    pub trie: TrieKind,
}

#[derive(Args)]
pub struct LogArgs {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "warn", help_heading = "Logging")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long, help_heading = "Logging")]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty", help_heading = "Logging")]
    pub json_logs: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
