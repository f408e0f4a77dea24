//! Bucket-level operations against an S3-compatible service.

mod bucket_operations;

pub use bucket_operations::BucketOperations;

use crate::Result;
use crate::types::BucketInfo;

/// Bucket queries needed to verify that a set of credentials works.
///
/// [`BucketOperations`] implements this against a live service; tests
/// provide in-memory implementations.
#[async_trait::async_trait]
pub trait BucketStore: Send + Sync {
    /// Returns whether the named bucket exists and is reachable with the
    /// current credentials.
    async fn bucket_exists(&self, bucket_name: &str) -> Result<bool>;

    /// Lists every bucket visible to the current credentials, in the order
    /// returned by the service.
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;
}
