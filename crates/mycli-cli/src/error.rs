//! Stage-labelled errors for the `connect` command.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::connect::StoreError;

/// Result type for the `connect` command.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Step of the `connect` command an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Stage {
    #[strum(serialize = "input")]
    Input,
    #[strum(serialize = "config load")]
    ConfigLoad,
    #[strum(serialize = "client construction")]
    ClientConstruction,
    #[strum(serialize = "bucket check")]
    BucketCheck,
    #[strum(serialize = "list buckets")]
    ListBuckets,
    #[strum(serialize = "connectivity check")]
    ConnectivityCheck,
    #[strum(serialize = "config save")]
    ConfigSave,
}

/// Errors raised by the `connect` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Terminal I/O failed or input ended before an answer was given.
    #[error("terminal I/O failed: {0}")]
    Input(#[source] io::Error),

    /// The saved configuration is missing or unreadable.
    #[error("{0}")]
    ConfigLoad(#[source] StoreError),

    /// The storage client could not be built; nothing was sent.
    #[error("failed to build storage client: {0}")]
    ClientConstruction(#[source] mycli_s3::Error),

    /// The bucket existence query itself failed.
    #[error("failed to check bucket '{bucket}': {source}")]
    BucketCheck {
        bucket: String,
        #[source]
        source: mycli_s3::Error,
    },

    /// Listing buckets failed.
    #[error("failed to list buckets: {0}")]
    ListBuckets(#[source] mycli_s3::Error),

    /// The network sequence exceeded its time bound.
    #[error("no response from the storage service within {}s", timeout.as_secs_f32())]
    Timeout { timeout: Duration },

    /// Saving the configuration failed.
    #[error("{0}")]
    ConfigSave(#[source] StoreError),
}

impl CliError {
    /// Returns the step this error came from.
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Input(_) => Stage::Input,
            Self::ConfigLoad(_) => Stage::ConfigLoad,
            Self::ClientConstruction(_) => Stage::ClientConstruction,
            Self::BucketCheck { .. } => Stage::BucketCheck,
            Self::ListBuckets(_) => Stage::ListBuckets,
            Self::Timeout { .. } => Stage::ConnectivityCheck,
            Self::ConfigSave(_) => Stage::ConfigSave,
        }
    }

    /// Returns a unique error code for this error type.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Input(_) => "E001",
            Self::ConfigLoad(_) => "E002",
            Self::ClientConstruction(_) => "E003",
            Self::BucketCheck { .. } => "E004",
            Self::ListBuckets(_) => "E005",
            Self::Timeout { .. } => "E006",
            Self::ConfigSave(_) => "E007",
        }
    }

    /// Whether this error aborts the command. Only a failed save after a
    /// successful connection is reported as a warning.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::ConfigSave(_))
    }

    /// Single-line message prefixed with the stage.
    pub fn report(&self) -> String {
        let severity = if self.is_fatal() { "error" } else { "warning" };
        format!("{severity}: {} failed: {self}", self.stage())
    }
}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        Self::Input(error)
    }
}
