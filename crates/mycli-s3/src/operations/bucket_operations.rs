//! Bucket operations for S3 storage.
//!
//! This module provides the bucket queries used by connectivity checks.

use minio::s3::error::{Error as SdkError, ErrorCode};
use minio::s3::types::S3Api;
use tracing::{debug, error, info, instrument};

use super::BucketStore;
use crate::types::BucketInfo;
use crate::{Error, Result, S3Client, TRACING_TARGET_BUCKETS, TRACING_TARGET_OPERATIONS};

/// Bucket operations backed by a live [`S3Client`].
#[derive(Debug, Clone)]
pub struct BucketOperations {
    client: S3Client,
}

impl BucketOperations {
    /// Creates new BucketOperations with an S3 client.
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Returns the client these operations run against.
    #[inline]
    pub fn client(&self) -> &S3Client {
        &self.client
    }

    /// Resolves the bucket region asynchronously, then sends the existence
    /// query pinned to that region.
    ///
    /// The SDK still enters `block_in_place` for the pinned region, so this
    /// requires a multi-thread runtime. A region lookup that reports
    /// `NoSuchBucket` means the bucket does not exist.
    async fn query_bucket_exists(&self, bucket_name: &str) -> Result<bool> {
        let client = self.client.as_inner();

        let region = match client.get_region_cached_async(bucket_name, &None).await {
            Ok(region) => region,
            Err(SdkError::S3Error(response)) if response.code == ErrorCode::NoSuchBucket => {
                return Ok(false);
            }
            Err(e) => return Err(Error::Client(e)),
        };

        debug!(
            target: TRACING_TARGET_OPERATIONS,
            bucket = %bucket_name,
            region = %region,
            "Bucket region resolved"
        );

        let response = client
            .bucket_exists(bucket_name)
            .region(Some(region))
            .send()
            .await?;

        Ok(response.exists)
    }
}

#[async_trait::async_trait]
impl BucketStore for BucketOperations {
    /// Checks if a bucket exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check itself fails (transport,
    /// authentication, service errors). A missing bucket is `Ok(false)`.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS, fields(bucket = %bucket_name))]
    async fn bucket_exists(&self, bucket_name: &str) -> Result<bool> {
        debug!(
            target: TRACING_TARGET_OPERATIONS,
            bucket = %bucket_name,
            "Checking if bucket exists"
        );

        let start = std::time::Instant::now();
        let result = self.query_bucket_exists(bucket_name).await;

        let elapsed = start.elapsed();

        match result {
            Ok(exists) => {
                debug!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket_name,
                    exists = %exists,
                    elapsed = ?elapsed,
                    "Bucket existence check completed"
                );
                Ok(exists)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket_name,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to check bucket existence"
                );
                Err(e)
            }
        }
    }

    /// Lists all buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket listing fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS)]
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        debug!(target: TRACING_TARGET_OPERATIONS, "Listing buckets");

        let start = std::time::Instant::now();
        let list_buckets_request = self.client.as_inner().list_buckets();
        let result = list_buckets_request.send().await.map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let buckets: Vec<BucketInfo> = response
                    .buckets
                    .into_iter()
                    .map(|bucket| BucketInfo::new(bucket.name))
                    .collect();

                info!(
                    target: TRACING_TARGET_BUCKETS,
                    count = buckets.len(),
                    elapsed = ?elapsed,
                    "Buckets listed successfully"
                );

                Ok(buckets)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to list buckets"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{S3Config, S3Credentials};

    // Nothing listens on port 1, so every request fails at the transport.
    fn unreachable_operations() -> BucketOperations {
        operations_for("127.0.0.1:1", None)
    }

    fn operations_for(endpoint: &str, region: Option<&str>) -> BucketOperations {
        let credentials = S3Credentials::new("access", "secret");
        let mut config = S3Config::new(endpoint, credentials).with_secure(false);
        if let Some(region) = region {
            config = config.with_region(region);
        }
        S3Client::new(config).unwrap().bucket_operations()
    }

    /// Accepts connections and never answers.
    async fn silent_endpoint() -> (tokio::net::TcpListener, String) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = listener.local_addr().unwrap().to_string();
        (listener, endpoint)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_buckets_transport_failure() {
        let operations = unreachable_operations();
        let result = operations.list_buckets().await;
        assert!(matches!(result, Err(Error::Client(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_bucket_exists_transport_failure() {
        let operations = unreachable_operations();
        let result = operations.bucket_exists("my-bucket").await;
        assert!(matches!(result, Err(Error::Client(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_bucket_exists_with_region_transport_failure() {
        let operations = operations_for("127.0.0.1:1", Some("us-east-1"));
        let result = operations.bucket_exists("my-bucket").await;
        assert!(matches!(result, Err(Error::Client(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_bucket_exists_is_cancellable_during_region_lookup() {
        let (_listener, endpoint) = silent_endpoint().await;
        let operations = operations_for(&endpoint, None);

        let bound = Duration::from_millis(300);
        let start = Instant::now();
        let result = tokio::time::timeout(bound, operations.bucket_exists("my-bucket")).await;

        assert!(result.is_err(), "expected the bound to elapse");
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_operations_share_client_config() {
        let operations = unreachable_operations();
        assert_eq!(operations.client().config().endpoint(), "127.0.0.1:1");
        assert!(!operations.client().config().is_secure());
    }
}
