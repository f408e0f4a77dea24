//! The `connect` command.
//!
//! Parameters come either from the interactive wizard or from the saved
//! configuration file, are checked against the storage service, and are
//! optionally saved afterwards.

mod checker;
mod params;
mod prompt;
mod store;
mod wizard;

use std::io::{BufRead, Write};
use std::time::Duration;

#[cfg(test)]
pub(crate) use checker::fake;
pub use checker::{
    ConnectivityChecker, ConnectivityReport, Connector, DEFAULT_CONNECT_TIMEOUT, S3Connector,
};
pub use params::ConnectionParameters;
pub use prompt::Prompter;
pub use store::{ConfigStore, StoreError};
use wizard::collect_parameters;

use crate::TRACING_TARGET_CONNECT;
use crate::config::ConnectArgs;
use crate::error::{CliError, CliResult};

/// Result of a successful `connect` run.
#[derive(Debug)]
pub struct ConnectOutcome {
    pub report: ConnectivityReport,
    /// Set when `--save` was requested and saving failed.
    pub save_warning: Option<CliError>,
}

/// Runs `connect`: obtain parameters, check them, optionally save them.
pub async fn run<C, R, W>(
    args: &ConnectArgs,
    connector: C,
    prompter: &mut Prompter<R, W>,
) -> CliResult<ConnectOutcome>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let store = ConfigStore::resolve(args.config.as_deref());

    let (params, save_target) = if args.use_config {
        let store = store.map_err(CliError::ConfigLoad)?;
        tracing::debug!(
            target: TRACING_TARGET_CONNECT,
            path = %store.path().display(),
            "Using saved configuration"
        );
        if args.save {
            tracing::debug!(
                target: TRACING_TARGET_CONNECT,
                "Ignoring --save, parameters come from the saved configuration"
            );
        }
        (store.load().map_err(CliError::ConfigLoad)?, None)
    } else {
        let params = collect_parameters(prompter)?;
        (params, args.save.then_some(store))
    };

    let timeout = Duration::from_secs(args.timeout_secs);
    writeln!(
        prompter.output(),
        "Connecting to {} (TLS: {}, region: {})...",
        params.endpoint().trim(),
        if params.use_ssl() { "on" } else { "off" },
        display_region(params.region()),
    )?;

    let checker = ConnectivityChecker::new(connector).with_timeout(timeout);
    tracing::debug!(
        target: TRACING_TARGET_CONNECT,
        endpoint = %params.endpoint().trim(),
        bucket = %params.bucket(),
        timeout = ?checker.timeout(),
        "Starting connectivity check"
    );
    let report = checker.check(&params).await?;

    report.render(prompter.output())?;
    writeln!(prompter.output(), "Connection successful.")?;

    let save_warning = match save_target {
        Some(store) => save(store, &params, prompter.output()).err(),
        None => None,
    };

    Ok(ConnectOutcome {
        report,
        save_warning,
    })
}

fn save<W: Write>(
    store: Result<ConfigStore, StoreError>,
    params: &ConnectionParameters,
    out: &mut W,
) -> CliResult<()> {
    let store = store.map_err(CliError::ConfigSave)?;
    store.save(params).map_err(CliError::ConfigSave)?;
    writeln!(out, "Configuration saved to {}", store.path().display())?;
    Ok(())
}

fn display_region(region: &str) -> &str {
    match region.trim() {
        "" => "default",
        region => region,
    }
}
