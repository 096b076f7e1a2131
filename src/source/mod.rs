//! Where account dumps come from.
//!
//! A dump is read from a local file or fetched over HTTP(S). Either may be
//! gzip compressed; compression is detected from the content.

mod client;

pub use client::{BasicClient, HttpClient};

use anyhow::{Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use crate::posts::AccountDump;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[async_trait]
pub trait DumpSource: Send + Sync {
    /// Raw dump bytes, possibly compressed.
    async fn load(&self) -> Result<Vec<u8>>;

    /// Human-readable location for logs.
    fn location(&self) -> &str;
}

pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl DumpSource for FileSource {
    async fn load(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read dump file {}", self.display))
    }

    fn location(&self) -> &str {
        &self.display
    }
}

pub struct HttpSource<C: HttpClient = BasicClient> {
    client: C,
    url: String,
}

impl HttpSource<BasicClient> {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(BasicClient::new(), url)
    }
}

impl<C: HttpClient> HttpSource<C> {
    pub fn with_client(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> DumpSource for HttpSource<C> {
    async fn load(&self) -> Result<Vec<u8>> {
        let req = reqwest::Request::new(reqwest::Method::GET, self.url.parse()?);

        let resp = self.client.execute(req).await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn source_for(location: &str) -> Box<dyn DumpSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Loads and parses the dump behind `source`.
#[tracing::instrument(skip(source), fields(source = %source.location()))]
pub async fn load_dump(source: &dyn DumpSource) -> Result<AccountDump> {
    let bytes = decompress(source.load().await?)?;
    debug!(bytes = bytes.len(), "Dump bytes received, parsing");

    let dump = AccountDump::from_slice(&bytes)
        .with_context(|| format!("invalid account dump at {}", source.location()))?;
    Ok(dump)
}

fn decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }
    let mut out = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut out)
        .context("failed to decompress gzip dump")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    const DUMP: &str = r#"{
        "about": {"name": "someone", "id": "abc", "created_utc": 1500000000.0,
                  "link_karma": 1, "comment_karma": 2},
        "comments": [],
        "submissions": []
    }"#;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        assert_eq!(
            source_for("https://example.com/u.json").location(),
            "https://example.com/u.json"
        );
        assert_eq!(source_for("dumps/u.json").location(), "dumps/u.json");
    }

    #[tokio::test]
    async fn test_load_plain_file() {
        let path = temp_path("account_profiler_test_plain.json");
        fs::write(&path, DUMP).unwrap();

        let dump = load_dump(&FileSource::new(&path)).await.unwrap();

        assert_eq!(dump.about.name, "someone");
        assert!(dump.is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_gzip_file() {
        let path = temp_path("account_profiler_test_gzip.json.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(DUMP.as_bytes()).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let dump = load_dump(&FileSource::new(&path)).await.unwrap();

        assert_eq!(dump.about.reddit_id, "abc");
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let result = load_dump(&FileSource::new(temp_path("account_profiler_missing.json"))).await;

        assert!(result.is_err());
    }
}
