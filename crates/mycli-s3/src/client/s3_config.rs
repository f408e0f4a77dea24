//! S3 client configuration.
//!
//! This module provides the configuration structure used to build an
//! [`S3Client`](super::S3Client): endpoint, credentials, transport security,
//! region and addressing style.

use url::Url;

use super::s3_credentials::S3Credentials;
use crate::{Error, Result};

/// S3 client configuration.
///
/// The endpoint is a bare `host[:port]`; the scheme is derived from
/// [`is_secure`](Self::is_secure) when the client is built.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Storage service endpoint as `host[:port]`, without a scheme.
    pub endpoint: String,

    /// Authentication credentials.
    pub credentials: S3Credentials,

    /// Whether to use an encrypted transport (HTTPS).
    pub secure: bool,

    /// Region to sign requests for, `None` for the service default.
    pub region: Option<String>,

    /// Whether to use path-style requests.
    ///
    /// When true, uses URLs like "endpoint/bucket/object".
    /// When false, uses virtual-hosted style like "bucket.endpoint/object".
    pub path_style: bool,
}

impl S3Config {
    /// Creates a new configuration for the given endpoint and credentials.
    ///
    /// The endpoint is trimmed. Connections default to HTTPS, path-style
    /// addressing and the service default region.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mycli_s3::{S3Config, S3Credentials};
    ///
    /// let credentials = S3Credentials::new("access_key", "secret_key");
    /// let config = S3Config::new(" play.min.io:9000 ", credentials)
    ///     .with_region("us-east-1");
    ///
    /// assert_eq!(config.endpoint(), "play.min.io:9000");
    /// assert_eq!(config.endpoint_url(), "https://play.min.io:9000");
    /// ```
    pub fn new(endpoint: impl AsRef<str>, credentials: S3Credentials) -> Self {
        Self {
            endpoint: endpoint.as_ref().trim().to_owned(),
            credentials,
            secure: true,
            region: None,
            path_style: true,
        }
    }

    /// Sets whether an encrypted transport is used.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the region. Blank values select the service default.
    pub fn with_region(mut self, region: impl AsRef<str>) -> Self {
        let region = region.as_ref().trim();
        self.region = (!region.is_empty()).then(|| region.to_owned());
        self
    }

    /// Sets whether to use path-style requests.
    pub fn with_path_style(mut self, path_style: bool) -> Self {
        self.path_style = path_style;
        self
    }

    /// Returns whether secure connections should be used.
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the bare endpoint.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the credentials.
    #[inline]
    pub fn credentials(&self) -> &S3Credentials {
        &self.credentials
    }

    /// Returns the configured region, if any.
    #[inline]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the endpoint prefixed with the scheme implied by [`is_secure`](Self::is_secure).
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.endpoint)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - The endpoint is empty, carries a scheme, or is not a plain `host[:port]`
    /// - The access key or secret key is empty
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config("Endpoint cannot be empty".to_string()));
        }

        if self.endpoint.contains("://") {
            return Err(Error::Config(format!(
                "Endpoint '{}' must not include a scheme, use host[:port]",
                self.endpoint
            )));
        }

        let url = Url::parse(&self.endpoint_url())
            .map_err(|e| Error::Config(format!("Invalid endpoint '{}': {}", self.endpoint, e)))?;

        if url.host().is_none() {
            return Err(Error::Config(
                "Endpoint must include a valid hostname".to_string(),
            ));
        }

        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(Error::Config(format!(
                "Endpoint '{}' must be host[:port] without a path",
                self.endpoint
            )));
        }

        if self.credentials.access_key.is_empty() {
            return Err(Error::Config("Access key cannot be empty".to_string()));
        }

        if self.credentials.secret_key.is_empty() {
            return Err(Error::Config("Secret key cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> S3Credentials {
        S3Credentials::new("access", "secret")
    }

    #[test]
    fn test_config_new() {
        let config = S3Config::new("  localhost:9000\n", credentials());

        assert_eq!(config.endpoint(), "localhost:9000");
        assert!(config.is_secure());
        assert!(config.path_style);
        assert!(config.region().is_none());
    }

    #[test]
    fn test_config_builder_methods() {
        let config = S3Config::new("s3.amazonaws.com", credentials())
            .with_secure(false)
            .with_region(" ap-southeast-1 ")
            .with_path_style(false);

        assert!(!config.is_secure());
        assert!(!config.path_style);
        assert_eq!(config.region(), Some("ap-southeast-1"));
        assert_eq!(config.endpoint_url(), "http://s3.amazonaws.com");
    }

    #[test]
    fn test_blank_region_is_default() {
        let config = S3Config::new("localhost:9000", credentials()).with_region("   ");
        assert!(config.region().is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(S3Config::new("localhost:9000", credentials()).validate().is_ok());
        assert!(S3Config::new("10.0.0.5", credentials()).validate().is_ok());

        let empty_endpoint = S3Config::new("", credentials());
        assert!(matches!(empty_endpoint.validate(), Err(Error::Config(_))));

        let with_scheme = S3Config::new("https://localhost:9000", credentials());
        assert!(with_scheme.validate().is_err());

        let with_path = S3Config::new("localhost:9000/bucket", credentials());
        assert!(with_path.validate().is_err());

        let empty_access = S3Config::new("localhost:9000", S3Credentials::new("", "secret"));
        assert!(empty_access.validate().is_err());

        let empty_secret = S3Config::new("localhost:9000", S3Credentials::new("access", ""));
        assert!(empty_secret.validate().is_err());
    }
}
