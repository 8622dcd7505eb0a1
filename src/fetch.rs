//! Producing the raw HTML artifact the extraction pipeline reads.

use crate::ExtractorError;
use std::path::Path;
use tokio::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_URL: &str = "https://www.cnbc.com/world/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const SETTLE_DELAY: Duration = Duration::from_secs(10);

#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractorError>;
}

/// Plain HTTP fetch with a desktop user agent, then a fixed wait before the
/// page is handed over.
pub struct HttpFetcher {
    client: reqwest::Client,
    settle: Duration,
}

impl HttpFetcher {
    pub fn new(settle: Duration) -> Result<HttpFetcher, ExtractorError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(HttpFetcher { client, settle })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractorError> {
        debug!("Visit {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        tokio::time::sleep(self.settle).await;
        Ok(html)
    }
}

/// Fetch `url` and store the page at `path`. Returns the number of bytes
/// written.
pub async fn save_page<F>(fetcher: &F, url: &str, path: &Path) -> Result<usize, ExtractorError>
where
    F: Fetcher + Sync + ?Sized,
{
    let html = fetcher.fetch(url).await?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, &html).await?;
    info!(url, path = %path.display(), bytes = html.len(), "Saved page");
    Ok(html.len())
}
