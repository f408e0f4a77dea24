//! High-level S3 client implementation.
//!
//! This module wraps the SDK client together with the configuration it was
//! built from. Building a client never touches the network.

use std::sync::Arc;

use minio::s3::Client;
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use tracing::{error, info, instrument};

use crate::operations::BucketOperations;
use crate::{Error, Result, S3Config, TRACING_TARGET_CLIENT};

/// High-level S3 client.
///
/// Cheap to clone; the SDK client and the configuration are shared.
#[derive(Clone)]
pub struct S3Client {
    inner: Client,
    config: Arc<S3Config>,
}

impl S3Client {
    /// Creates a new S3 client with the provided configuration.
    ///
    /// The client uses static credentials, TLS iff the configuration is
    /// secure, path-style addressing unless disabled, and the configured
    /// region when one is set. Connectivity is not tested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - Configuration validation fails
    /// - The SDK rejects the endpoint or fails to build its client
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mycli_s3::{S3Client, S3Config, S3Credentials};
    ///
    /// let credentials = S3Credentials::new("access_key", "secret_key");
    /// let config = S3Config::new("play.min.io", credentials);
    /// let client = S3Client::new(config).unwrap();
    /// ```
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(endpoint = %config.endpoint()))]
    pub fn new(config: S3Config) -> Result<Self> {
        info!(target: TRACING_TARGET_CLIENT, "Initializing S3 client");

        config.validate().inspect_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
        })?;

        let mut base_url: BaseUrl = config.endpoint_url().parse().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Invalid endpoint URL");
            Error::Config(format!("Invalid endpoint URL: {}", e))
        })?;

        base_url.https = config.is_secure();
        base_url.virtual_style = !config.path_style;
        if let Some(region) = config.region() {
            base_url.region = region.to_owned();
        }

        let provider = Box::new(StaticProvider::from(config.credentials().clone()));
        let inner = Client::new(base_url, Some(provider), None, None).map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Failed to create S3 client");
            Error::Config(format!("Failed to build S3 client: {}", e))
        })?;

        info!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint(),
            secure = config.is_secure(),
            region = config.region().unwrap_or("default"),
            path_style = config.path_style,
            "S3 client initialized"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Creates a new BucketOperations instance.
    pub fn bucket_operations(&self) -> BucketOperations {
        BucketOperations::new(self.clone())
    }

    /// Returns the configuration this client was built from.
    #[inline]
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Returns a reference to the inner client.
    #[inline]
    pub(crate) fn as_inner(&self) -> &Client {
        &self.inner
    }
}

impl std::fmt::Debug for S3Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Client")
            .field("endpoint", &self.config.endpoint())
            .field("secure", &self.config.is_secure())
            .field("region", &self.config.region())
            .field("path_style", &self.config.path_style)
            .field("access_key", &self.config.credentials().access_key_masked())
            .finish()
    }
}
