//! Backing sources for the schedule data file.
//!
//! The document can live on disk next to the site or behind an HTTP URL;
//! the loader only sees the [`ScheduleSource`] trait.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::LoadError;

/// Where the raw schedule document comes from.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the raw document bytes.
    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Schedule document on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScheduleSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Schedule document behind an HTTP(S) URL.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: String, user_agent: &str, timeout_secs: u64) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl ScheduleSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let fetch_err = |source| LoadError::Fetch {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;

        let bytes = response.bytes().await.map_err(fetch_err)?;
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a source for a configured location: HTTP(S) URLs fetch remotely,
/// everything else is treated as a filesystem path.
pub fn source_from_spec(
    spec: &str,
    user_agent: &str,
    timeout_secs: u64,
) -> anyhow::Result<Box<dyn ScheduleSource>> {
    match Url::parse(spec) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let source = HttpSource::new(spec.to_string(), user_agent, timeout_secs)?;
            Ok(Box::new(source))
        }
        _ => Ok(Box::new(FileSource::new(spec))),
    }
}
