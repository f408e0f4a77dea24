#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod connect;
mod dispatch;
mod error;
mod telemetry;

use std::io::{self, BufRead, Write};
use std::process;

use crate::config::{BuildInfo, Invocation};
use crate::connect::{Prompter, S3Connector};
use crate::dispatch::{Dispatcher, EXIT_FAILURE};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "mycli_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "mycli_cli::config";
pub const TRACING_TARGET_CONNECT: &str = "mycli_cli::connect";
pub const TRACING_TARGET_STORE: &str = "mycli_cli::store";

const BUILD_INFO: BuildInfo = BuildInfo::new(env!("CARGO_PKG_VERSION"));

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            EXIT_FAILURE
        }
    };

    process::exit(code);
}

/// Main application entry point. Returns the process exit code.
async fn run() -> anyhow::Result<i32> {
    telemetry::init_tracing()?;

    let invocation = Invocation::init();
    let mut prompter = Prompter::stdio();
    log_startup_info(&prompter);

    let dispatcher = Dispatcher::new(BUILD_INFO, S3Connector);
    let mut stderr = io::stderr().lock();
    let code = dispatcher
        .dispatch(invocation, &mut prompter, &mut stderr)
        .await;

    Ok(code)
}

/// Logs startup information.
fn log_startup_info<R: BufRead, W: Write>(prompter: &Prompter<R, W>) {
    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        version = BUILD_INFO.version,
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        masked_input = prompter.supports_masking(),
        features = ?enabled_features(),
        "build information"
    );
}

/// Returns a list of enabled compile-time features.
fn enabled_features() -> Vec<&'static str> {
    [cfg!(feature = "dotenv").then_some("dotenv")]
        .into_iter()
        .flatten()
        .collect()
}
