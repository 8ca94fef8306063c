use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{info, warn};

use crate::scrapers::traits::Navigator;

/// Total attempts per fetch; a marker-wait timeout counts as a failed
/// attempt.
const ATTEMPTS: usize = 2;
const RETRY_PAUSE: Duration = Duration::from_secs(2);
/// Client-rendered pages keep mutating briefly after the navigation
/// event; give them a moment before touching the DOM.
const SETTLE_PAUSE: Duration = Duration::from_secs(2);

/// Navigator driving a headless Chrome session. The listing sites
/// render client-side, so a fetch waits for a content marker instead
/// of trusting the navigation event alone. One tab serves the whole
/// run.
pub struct BrowserNavigator {
    // Dropping the Browser ends the Chrome session, so it lives here
    // even though only the tab is driven.
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserNavigator {
    /// Launch headless Chrome and open the run's tab.
    pub fn launch() -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
            ])
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open a tab")?;

        Ok(Self { browser, tab })
    }

    /// Click the cookie overlay's button if one is showing. The
    /// overlay is frequently absent; this never fails the fetch.
    fn dismiss_consent(&self, button_text: &str) {
        let script = format!(
            r#"
            (() => {{
                const button = Array.from(document.querySelectorAll('button'))
                    .find(b => b.textContent.includes('{button_text}'));
                if (button) button.click();
            }})();
            "#
        );
        let _ = self.tab.evaluate(&script, false);
    }

    async fn load(
        &self,
        url: &str,
        ready_marker: &str,
        wait: Duration,
        consent: Option<&str>,
    ) -> Result<String> {
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.tab
            .wait_until_navigated()
            .context("Page never finished navigating")?;
        tokio::time::sleep(SETTLE_PAUSE).await;

        if let Some(button_text) = consent {
            self.dismiss_consent(button_text);
        }

        self.tab
            .wait_for_element_with_custom_timeout(ready_marker, wait)
            .with_context(|| format!("Marker '{ready_marker}' did not render on {url}"))?;

        self.tab.get_content().context("Could not read page HTML")
    }
}

#[async_trait]
impl Navigator for BrowserNavigator {
    async fn fetch(
        &self,
        url: &str,
        ready_marker: &str,
        wait: Duration,
        consent: Option<&str>,
    ) -> Result<String> {
        let mut last_error = None;
        for attempt in 1..=ATTEMPTS {
            match self.load(url, ready_marker, wait, consent).await {
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
        Err(last_error.unwrap_or_else(|| anyhow!("Navigation failed for {url}")))
    }
}
