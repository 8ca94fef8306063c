use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Common seam for fetching pages, whether through a headless browser
/// or a plain HTTP client. Implementations hand back the raw HTML;
/// parsing stays on the caller's side so parsed documents never cross
/// an await point.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Fetch `url` and return its HTML once `ready_marker` has
    /// rendered, waiting at most `wait` for it. `consent` carries the
    /// text of a cookie-overlay button to dismiss best-effort; media
    /// that cannot show overlays ignore it.
    ///
    /// A failed fetch is an error for this one page only; callers skip
    /// the page and continue.
    async fn fetch(
        &self,
        url: &str,
        ready_marker: &str,
        wait: Duration,
        consent: Option<&str>,
    ) -> Result<String>;
}
