//! Interactive collection of connection parameters.

use std::io::{self, BufRead, Write};

use super::{ConnectionParameters, Prompter};

pub const ENDPOINT_PROMPT: &str = "Endpoint (host[:port], without http:// or https://): ";
pub const ACCESS_KEY_PROMPT: &str = "Access key: ";
pub const SECRET_KEY_PROMPT: &str = "Secret key: ";
pub const REGION_PROMPT: &str = "Region (leave empty for the service default): ";
pub const SSL_PROMPT: &str = "Use SSL/TLS? [y/N]: ";
pub const BUCKET_PROMPT: &str = "Bucket to check (leave empty to skip): ";

/// Asks for each field in order: endpoint, access key, secret key, region,
/// SSL choice, bucket.
pub fn collect_parameters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<ConnectionParameters> {
    writeln!(prompter.output(), "S3 / MinIO connection setup")?;
    writeln!(prompter.output())?;

    let endpoint = prompter.required(ENDPOINT_PROMPT)?;
    let access_key = prompter.required(ACCESS_KEY_PROMPT)?;
    let secret_key = prompter.secret(SECRET_KEY_PROMPT)?;
    let region = prompter.optional(REGION_PROMPT)?;
    let use_ssl = prompter.confirm(SSL_PROMPT)?;
    let bucket = prompter.optional(BUCKET_PROMPT)?;

    writeln!(prompter.output())?;

    Ok(ConnectionParameters::new(endpoint, access_key, secret_key)
        .with_region(region)
        .with_ssl(use_ssl)
        .with_bucket(bucket))
}
