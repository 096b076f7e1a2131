//! Report persistence: local JSON files and S3 uploads.

use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Serializes `value` as pretty JSON, gzip compressed when `gzip` is set.
pub fn encode_json(value: &impl Serialize, gzip: bool) -> Result<Vec<u8>> {
    let json = serde_json::to_vec_pretty(value)?;
    if !gzip {
        return Ok(json);
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

/// Writes `value` to `path`, creating parent directories as needed.
pub fn write_report(path: impl AsRef<Path>, value: &impl Serialize, gzip: bool) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let body = encode_json(value, gzip)?;
    debug!(path = %path.display(), bytes = body.len(), gzip, "Writing report");
    std::fs::write(path, body)?;
    Ok(())
}

/// S3 key a profile is uploaded under.
pub fn report_key(username: &str, gzip: bool) -> String {
    if gzip {
        format!("profiles/{username}.json.gz")
    } else {
        format!("profiles/{username}.json")
    }
}

/// Serializes `value` to JSON and uploads it to `bucket` under `key`.
pub async fn upload_report(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    value: &impl Serialize,
    gzip: bool,
) -> Result<()> {
    let body = encode_json(value, gzip)?;

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type("application/json");
    if gzip {
        request = request.content_encoding("gzip");
    }
    request.send().await?;

    info!(bucket, key, "Report uploaded to S3");
    Ok(())
}
