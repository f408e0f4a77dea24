#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![allow(clippy::result_large_err)]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "mycli_s3::client";
pub const TRACING_TARGET_OPERATIONS: &str = "mycli_s3::operations";
pub const TRACING_TARGET_BUCKETS: &str = "mycli_s3::buckets";

pub mod client;
pub mod operations;
pub mod types;

// Re-export for convenience
pub use crate::client::{S3Client, S3Config, S3Credentials};
pub use crate::operations::{BucketOperations, BucketStore};
pub use crate::types::BucketInfo;

/// Error type for S3 storage operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes empty endpoints or credentials, endpoints carrying a
    /// scheme or path, and anything the SDK refuses while building a client.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying SDK error.
    ///
    /// Transport, authentication and service-side failures surface here.
    #[error("S3 client error: {0}")]
    Client(#[from] minio::s3::error::Error),
}

impl Error {
    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Specialized [`Result`] type for S3 operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
