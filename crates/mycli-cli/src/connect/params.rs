//! Connection parameters collected by the wizard or loaded from disk.

use mycli_s3::{S3Config, S3Credentials};
use serde::{Deserialize, Serialize};

/// Everything needed to reach an S3-compatible service.
///
/// Built once, by the wizard or by the configuration store, and never
/// modified afterwards. The serialized form is the persisted config file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParameters {
    endpoint: String,
    access_key: String,
    secret_key: String,
    #[serde(default)]
    region: String,
    #[serde(rename = "useSSL", default)]
    use_ssl: bool,
    #[serde(default)]
    bucket: String,
}

impl ConnectionParameters {
    /// Creates parameters with the required fields; TLS off, no region, no bucket.
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: String::new(),
            use_ssl: false,
            bucket: String::new(),
        }
    }

    /// Sets the region; empty selects the service default.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Selects an encrypted transport.
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Sets the bucket to check before listing; empty skips the check.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    #[inline]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the static credential pair.
    pub fn credentials(&self) -> S3Credentials {
        S3Credentials::new(self.access_key(), self.secret_key())
    }

    /// Builds the storage client configuration: trimmed endpoint, static
    /// credentials, path-style addressing, region only when non-empty.
    pub fn to_s3_config(&self) -> S3Config {
        S3Config::new(self.endpoint(), self.credentials())
            .with_secure(self.use_ssl())
            .with_region(self.region())
            .with_path_style(true)
    }
}

impl std::fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.credentials().access_key_masked())
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("use_ssl", &self.use_ssl)
            .field("bucket", &self.bucket)
            .finish()
    }
}
