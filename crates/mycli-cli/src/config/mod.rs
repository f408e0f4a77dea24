//! CLI configuration.
//!
//! ```text
//! mycli [-version | --version]
//! mycli connect [--use-config] [--save] [--config PATH] [--timeout SECS]
//! ```
//!
//! `--config` and `--timeout` can also be provided via the `MYCLI_CONFIG`
//! and `MYCLI_CONNECT_TIMEOUT` environment variables.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::TRACING_TARGET_CONFIG;
use crate::connect::DEFAULT_CONNECT_TIMEOUT;

/// Build metadata passed to the dispatcher at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
}

impl BuildInfo {
    pub const fn new(version: &'static str) -> Self {
        Self { version }
    }
}

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "mycli")]
#[command(about = "Check connectivity to S3-compatible object storage")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print the version and exit.
    #[arg(long)]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect connection parameters and test them against the service.
    Connect(ConnectArgs),
}

/// Flags of the `connect` command.
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ConnectArgs {
    /// Use the saved configuration instead of prompting.
    #[arg(long)]
    pub use_config: bool,

    /// Save the parameters after a successful connection.
    #[arg(long)]
    pub save: bool,

    /// Configuration file to load from and save to.
    ///
    /// Defaults to ~/.mycli/config.json.
    #[arg(long, env = "MYCLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds allowed for the bucket check and listing together.
    #[arg(long = "timeout", env = "MYCLI_CONNECT_TIMEOUT", value_name = "SECS")]
    #[arg(default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,
}

/// What a single run of the program does, decided once from argv.
#[derive(Debug)]
pub enum Invocation {
    /// Print the usage text.
    Usage(String),
    /// Print the version.
    Version,
    /// Run the `connect` command.
    Connect(ConnectArgs),
}

impl Invocation {
    /// Loads environment variables from .env file (if enabled) and parses
    /// the process arguments.
    pub fn init() -> Self {
        load_dotenv();
        Self::parse_from(std::env::args_os())
    }

    /// Parses an argument list, program name first.
    ///
    /// A single-dash `-version` is accepted as `--version`. Anything that
    /// does not parse, including `--help`, selects the usage text.
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = args.into_iter().map(Into::into).map(normalize_version_flag);

        match Cli::try_parse_from(args) {
            Ok(Cli { version: true, .. }) => Self::Version,
            Ok(Cli {
                command: Some(Command::Connect(args)),
                ..
            }) => Self::Connect(args),
            Ok(Cli { command: None, .. }) => Self::Usage(usage()),
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET_CONFIG,
                    kind = ?error.kind(),
                    "Arguments not recognized, showing usage"
                );
                Self::Usage(usage())
            }
        }
    }
}

/// Renders the help text.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

fn normalize_version_flag(arg: OsString) -> OsString {
    if arg == "-version" {
        OsString::from("--version")
    } else {
        arg
    }
}

#[cfg(feature = "dotenv")]
fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("Warning: failed to load .env file: {err}");
    }
}

#[cfg(not(feature = "dotenv"))]
fn load_dotenv() {}
