use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::scrapers::traits::Navigator;

const ATTEMPTS: usize = 2;
const RETRY_PAUSE: Duration = Duration::from_secs(2);

/// Navigator for server-rendered pages over plain HTTP. Ready markers
/// and consent overlays are browser concerns and are ignored here.
pub struct HttpNavigator {
    client: Client,
}

impl HttpNavigator {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            bail!("GET {url} returned {}", response.status());
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    async fn fetch(
        &self,
        url: &str,
        _ready_marker: &str,
        _wait: Duration,
        _consent: Option<&str>,
    ) -> Result<String> {
        let mut last_error = None;
        for attempt in 1..=ATTEMPTS {
            match self.get(url).await {
                Ok(html) => return Ok(html),
                Err(error) => {
                    warn!("Attempt {}/{} failed for {}: {:#}", attempt, ATTEMPTS, url, error);
                    last_error = Some(error);
                    if attempt < ATTEMPTS {
                        tokio::time::sleep(RETRY_PAUSE).await;
                    }
                }
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow!("Fetch failed for {url}")))
    }
}
