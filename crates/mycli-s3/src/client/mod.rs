//! S3 client with configuration and credentials.
//!
//! This module provides the pieces needed to build a storage client for an
//! S3-compatible service (AWS S3, MinIO, ...):
//!
//! - [`S3Credentials`]: static access/secret key pair
//! - [`S3Config`]: endpoint, transport security, region and addressing style
//! - [`S3Client`]: the SDK client built from a validated configuration

mod s3_client;
mod s3_config;
mod s3_credentials;

pub use s3_client::S3Client;
pub use s3_config::S3Config;
pub use s3_credentials::S3Credentials;
