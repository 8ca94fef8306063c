use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_api_key: String,
    /// Port for the health endpoint.
    pub port: u16,
    /// Pause between scrape passes.
    pub interval: Duration,
    /// Exit after a single pass instead of looping.
    pub run_once: bool,
    /// Also sweep the brand/model targets after the newest-first pass.
    pub model_sweep: bool,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Missing store credentials are fatal here: without them every
    /// write would fail uniformly, so the process refuses to start
    /// rather than discover that mid-run.
    pub fn from_env() -> Result<Self> {
        let supabase_url = required("SUPABASE_URL")?;
        let supabase_api_key = required("SUPABASE_API_KEY")?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a number")?;
        let interval_secs: u64 = env::var("SCRAPE_INTERVAL_SECS")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .context("SCRAPE_INTERVAL_SECS must be a number")?;

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_api_key,
            port,
            interval: Duration::from_secs(interval_secs),
            run_once: flag("RUN_ONCE"),
            model_sweep: flag("SCRAPE_MODELS"),
        })
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{name} is not set; refusing to start without store credentials"),
    }
}

fn flag(name: &str) -> bool {
    matches!(
        env::var(name).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
