//! Routes an [`Invocation`] to its handler and maps the result to an exit code.

use std::io::{self, BufRead, Write};

use crate::config::{BuildInfo, Invocation};
use crate::connect::{self, Connector, Prompter};
use crate::{TRACING_TARGET_CONNECT, TRACING_TARGET_STARTUP};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Runs one invocation of the program.
#[derive(Debug)]
pub struct Dispatcher<C> {
    build: BuildInfo,
    connector: C,
}

impl<C: Connector> Dispatcher<C> {
    pub fn new(build: BuildInfo, connector: C) -> Self {
        Self { build, connector }
    }

    /// Handles `invocation`, writing results through `prompter` and
    /// diagnostics to `stderr`. Returns the process exit code.
    pub async fn dispatch<R, W, E>(
        &self,
        invocation: Invocation,
        prompter: &mut Prompter<R, W>,
        stderr: &mut E,
    ) -> i32
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        match invocation {
            Invocation::Usage(text) => {
                let written = write!(prompter.output(), "{text}");
                exit_code_for_output(written, "usage")
            }
            Invocation::Version => {
                tracing::debug!(
                    target: TRACING_TARGET_STARTUP,
                    version = self.build.version,
                    "Printing version"
                );
                let written = writeln!(prompter.output(), "{}", self.build.version);
                exit_code_for_output(written, "version")
            }
            Invocation::Connect(args) => {
                match connect::run(&args, &self.connector, prompter).await {
                    Ok(outcome) => {
                        if let Some(warning) = outcome.save_warning {
                            tracing::warn!(
                                target: TRACING_TARGET_CONNECT,
                                error = %warning,
                                error_code = warning.error_code(),
                                "Configuration was not saved"
                            );
                            let _ = writeln!(stderr, "{}", warning.report());
                        }

                        tracing::info!(
                            target: TRACING_TARGET_CONNECT,
                            buckets = outcome.report.buckets.len(),
                            "Connect finished"
                        );
                        EXIT_SUCCESS
                    }
                    Err(error) => {
                        tracing::error!(
                            target: TRACING_TARGET_CONNECT,
                            error = %error,
                            error_code = error.error_code(),
                            stage = %error.stage(),
                            "Connect failed"
                        );
                        let _ = writeln!(stderr, "{}", error.report());
                        EXIT_FAILURE
                    }
                }
            }
        }
    }
}

/// Succeeds only when the requested text reached stdout.
fn exit_code_for_output(written: io::Result<()>, what: &'static str) -> i32 {
    match written {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_STARTUP,
                error = %error,
                output = what,
                "Failed to write to stdout"
            );
            EXIT_FAILURE
        }
    }
}
