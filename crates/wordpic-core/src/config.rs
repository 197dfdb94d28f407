//! Configuration module
//!
//! All settings are read from the environment with working defaults, so a
//! bare `wordpic-api` starts against real AWS endpoints with only
//! credentials exported. `S3_ENDPOINT` / `DYNAMODB_ENDPOINT` point the
//! clients at S3-compatible providers (MinIO, LocalStack) for local runs.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REGION: &str = "us-east-2";
const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;

/// Process-wide configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub aws_region: String,
    /// Custom endpoint for S3-compatible providers.
    pub s3_endpoint: Option<String>,
    /// Custom endpoint for local DynamoDB.
    pub dynamodb_endpoint: Option<String>,
    /// Bucket receiving untransformed uploads.
    pub original_bucket: String,
    /// Bucket receiving transformed uploads.
    pub compressed_bucket: String,
    /// Record table for untransformed-image meanings.
    pub word_table: String,
    /// Record table for transformed-image meanings.
    pub compressed_word_table: String,
    /// Target width for the transform stage. None = keep width.
    pub resize_width: Option<u32>,
    /// Target height for the transform stage. None = keep height.
    pub resize_height: Option<u32>,
    pub max_file_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origins,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
            original_bucket: env::var("ORIGINAL_BUCKET")
                .unwrap_or_else(|_| "wordpic-image-original".to_string()),
            compressed_bucket: env::var("COMPRESSED_BUCKET")
                .unwrap_or_else(|_| "wordpic-image-compressed".to_string()),
            word_table: env::var("WORD_TABLE").unwrap_or_else(|_| "Word-Image".to_string()),
            compressed_word_table: env::var("COMPRESSED_WORD_TABLE")
                .unwrap_or_else(|_| "compressed-image-word".to_string()),
            resize_width: parse_optional_u32(env::var("RESIZE_WIDTH").ok()),
            resize_height: parse_optional_u32(env::var("RESIZE_HEIGHT").ok()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        })
    }
}

/// Parse an optional dimension. Unset, empty, and non-numeric values all
/// mean "no constraint".
fn parse_optional_u32(value: Option<String>) -> Option<u32> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
        .filter(|&v| v > 0)
}
