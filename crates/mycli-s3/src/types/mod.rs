//! Types returned by storage operations.

mod bucket_info;

pub use bucket_info::BucketInfo;
