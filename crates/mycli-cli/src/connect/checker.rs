//! Connectivity check against the storage service.
//!
//! The check builds a client, optionally confirms one bucket, then lists
//! every bucket the credentials can see. The two network steps share one
//! time bound and are cancelled together when it is exceeded.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use mycli_s3::{BucketInfo, BucketOperations, BucketStore, S3Client};

use super::ConnectionParameters;
use crate::TRACING_TARGET_CONNECT;
use crate::error::{CliError, CliResult};

/// Time bound for the whole network sequence unless overridden.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Builds a [`BucketStore`] from connection parameters.
///
/// Construction must not touch the network.
pub trait Connector {
    type Store: BucketStore;

    fn connect(&self, params: &ConnectionParameters) -> mycli_s3::Result<Self::Store>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Store = C::Store;

    fn connect(&self, params: &ConnectionParameters) -> mycli_s3::Result<Self::Store> {
        (**self).connect(params)
    }
}

/// Connects through the S3 SDK.
#[derive(Debug, Default, Clone, Copy)]
pub struct S3Connector;

impl Connector for S3Connector {
    type Store = BucketOperations;

    fn connect(&self, params: &ConnectionParameters) -> mycli_s3::Result<Self::Store> {
        let client = S3Client::new(params.to_s3_config())?;
        Ok(client.bucket_operations())
    }
}

/// Outcome of the optional single-bucket check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStatus {
    pub name: String,
    pub accessible: bool,
}

/// Everything learned by a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Present when a bucket was named.
    pub bucket: Option<BucketStatus>,
    /// Buckets in service order.
    pub buckets: Vec<BucketInfo>,
}

impl ConnectivityReport {
    /// Writes the human-readable result lines.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(status) = &self.bucket {
            if status.accessible {
                writeln!(out, "Bucket \"{}\" is accessible.", status.name)?;
            } else {
                writeln!(
                    out,
                    "Bucket \"{}\" does not exist or is not accessible with these credentials.",
                    status.name
                )?;
            }
        }

        writeln!(out, "Found {} bucket(s):", self.buckets.len())?;
        for bucket in &self.buckets {
            writeln!(out, "  - {bucket}")?;
        }

        Ok(())
    }
}

/// Runs the connectivity sequence with a fixed time bound.
#[derive(Debug, Clone)]
pub struct ConnectivityChecker<C> {
    connector: C,
    timeout: Duration,
}

impl<C: Connector> ConnectivityChecker<C> {
    /// Creates a checker using [`DEFAULT_CONNECT_TIMEOUT`].
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Overrides the time bound of the network sequence.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a client from `params`, then checks the bucket (if any) and
    /// lists all buckets.
    ///
    /// # Errors
    ///
    /// Aborts at the first hard failure: client construction, a failed
    /// bucket query, a failed listing, or the time bound. A bucket that
    /// does not exist is reported, not treated as a failure.
    pub async fn check(&self, params: &ConnectionParameters) -> CliResult<ConnectivityReport> {
        let store = self
            .connector
            .connect(params)
            .map_err(CliError::ClientConstruction)?;

        let start = Instant::now();
        let report = tokio::time::timeout(self.timeout, run_sequence(&store, params.bucket()))
            .await
            .map_err(|_| {
                tracing::warn!(
                    target: TRACING_TARGET_CONNECT,
                    timeout = ?self.timeout,
                    "Connectivity check timed out"
                );
                CliError::Timeout {
                    timeout: self.timeout,
                }
            })??;

        tracing::info!(
            target: TRACING_TARGET_CONNECT,
            buckets = report.buckets.len(),
            elapsed = ?start.elapsed(),
            "Connectivity check completed"
        );

        Ok(report)
    }
}

async fn run_sequence<S: BucketStore>(store: &S, bucket: &str) -> CliResult<ConnectivityReport> {
    let bucket = bucket.trim();
    let status = if bucket.is_empty() {
        None
    } else {
        let accessible = store
            .bucket_exists(bucket)
            .await
            .map_err(|source| CliError::BucketCheck {
                bucket: bucket.to_owned(),
                source,
            })?;

        Some(BucketStatus {
            name: bucket.to_owned(),
            accessible,
        })
    };

    let buckets = store.list_buckets().await.map_err(CliError::ListBuckets)?;

    Ok(ConnectivityReport {
        bucket: status,
        buckets,
    })
}


#[cfg(test)]
mod tests {
    use super::fake::{FakeConnector, Script};
    use super::*;

    fn checker(script: Script) -> (ConnectivityChecker<FakeConnector>, FakeConnector) {
        let connector = FakeConnector::new(script);
        (ConnectivityChecker::new(connector.clone()), connector)
    }

    fn rendered(report: &ConnectivityReport) -> String {
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn empty_bucket_skips_existence_check() {
        let (checker, connector) = checker(Script {
            buckets: vec!["logs", "backups"],
            ..Script::default()
        });
        let params = ConnectionParameters::new("s3.amazonaws.com", "AKIA", "secret")
            .with_region("ap-southeast-1")
            .with_ssl(true);

        let report = checker.check(&params).await.unwrap();

        assert_eq!(connector.calls(), ["connect", "list_buckets"]);
        assert!(report.bucket.is_none());
        assert_eq!(
            rendered(&report),
            "Found 2 bucket(s):\n  - logs\n  - backups\n"
        );
    }

    #[tokio::test]
    async fn missing_bucket_is_informational() {
        let (checker, connector) = checker(Script {
            bucket_exists: false,
            buckets: vec!["other"],
            ..Script::default()
        });
        let params =
            ConnectionParameters::new("localhost:9000", "minio", "minio123").with_bucket("my-bucket");

        let report = checker.check(&params).await.unwrap();

        assert_eq!(
            connector.calls(),
            ["connect", "bucket_exists:my-bucket", "list_buckets"]
        );
        assert_eq!(
            report.bucket,
            Some(BucketStatus {
                name: "my-bucket".into(),
                accessible: false
            })
        );
        assert!(rendered(&report).contains("\"my-bucket\" does not exist or is not accessible"));
    }

    #[tokio::test]
    async fn accessible_bucket_is_reported() {
        let (checker, _) = checker(Script {
            bucket_exists: true,
            buckets: vec!["my-bucket"],
            ..Script::default()
        });
        let params =
            ConnectionParameters::new("localhost:9000", "minio", "minio123").with_bucket("my-bucket");

        let report = checker.check(&params).await.unwrap();
        assert!(rendered(&report).starts_with("Bucket \"my-bucket\" is accessible.\n"));
    }

    #[tokio::test]
    async fn client_failure_makes_no_calls() {
        let (checker, connector) = checker(Script {
            reject_client: Some("Endpoint cannot be empty".into()),
            ..Script::default()
        });
        let params = ConnectionParameters::new("", "minio", "minio123").with_bucket("b");

        let err = checker.check(&params).await.unwrap_err();

        assert!(matches!(err, CliError::ClientConstruction(_)));
        assert!(connector.calls().is_empty());
    }

    #[tokio::test]
    async fn bucket_query_failure_aborts_before_listing() {
        let (checker, connector) = checker(Script {
            bucket_error: Some("Access Denied".into()),
            ..Script::default()
        });
        let params =
            ConnectionParameters::new("localhost:9000", "minio", "minio123").with_bucket("secret");

        let err = checker.check(&params).await.unwrap_err();

        assert!(matches!(err, CliError::BucketCheck { ref bucket, .. } if bucket == "secret"));
        assert_eq!(connector.calls(), ["connect", "bucket_exists:secret"]);
    }

    #[tokio::test]
    async fn listing_failure_is_fatal() {
        let (checker, _) = checker(Script {
            list_error: Some("InvalidAccessKeyId".into()),
            ..Script::default()
        });
        let params = ConnectionParameters::new("localhost:9000", "minio", "wrong");

        let err = checker.check(&params).await.unwrap_err();
        assert!(matches!(err, CliError::ListBuckets(_)));
    }

    #[tokio::test]
    async fn slow_service_times_out_as_a_unit() {
        let (checker, connector) = checker(Script {
            bucket_exists: true,
            delay: Some(Duration::from_secs(5)),
            ..Script::default()
        });
        let checker = checker.with_timeout(Duration::from_millis(20));
        let params =
            ConnectionParameters::new("localhost:9000", "minio", "minio123").with_bucket("slow");

        let err = checker.check(&params).await.unwrap_err();

        assert!(matches!(err, CliError::Timeout { timeout } if timeout == Duration::from_millis(20)));
        assert_eq!(connector.calls(), ["connect", "bucket_exists:slow"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn s3_connector_unreachable_endpoint_fails_bucket_check() {
        let checker = ConnectivityChecker::new(S3Connector).with_timeout(Duration::from_secs(10));
        let params = ConnectionParameters::new("127.0.0.1:1", "minio", "minio123")
            .with_region("us-east-1")
            .with_bucket("my-bucket");

        let err = checker.check(&params).await.unwrap_err();

        assert_eq!(err.stage(), crate::error::Stage::BucketCheck, "{err}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn s3_connector_silent_service_times_out_within_bound() {
        // Accepts connections and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = listener.local_addr().unwrap().to_string();

        let checker =
            ConnectivityChecker::new(S3Connector).with_timeout(Duration::from_millis(500));
        let params = ConnectionParameters::new(endpoint, "minio", "minio123").with_bucket("my-bucket");

        let start = Instant::now();
        let result = tokio::time::timeout(Duration::from_secs(10), checker.check(&params))
            .await
            .expect("check must return once its own bound elapses");

        assert!(matches!(result, Err(CliError::Timeout { .. })), "{result:?}");
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn s3_connector_rejects_empty_endpoint() {
        let params = ConnectionParameters::new("", "minio", "minio123");
        assert!(S3Connector.connect(&params).is_err());
    }

    #[test]
    fn default_timeout_is_fifteen_seconds() {
        let checker = ConnectivityChecker::new(S3Connector);
        assert_eq!(checker.timeout(), Duration::from_secs(15));
    }
}
