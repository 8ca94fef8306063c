use std::time::Duration;

use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use car_scout::config::AppConfig;
use car_scout::pipeline;
use car_scout::scrapers::{
    bilbasen, bilhandel, BrowserNavigator, HttpNavigator, IndexQuery, SiteProfile, SiteTarget,
};
use car_scout::server;
use car_scout::store::{KnownIds, SupabaseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Car Scout - incremental listing sync");
    info!("=======================================");

    let config = AppConfig::from_env()?;
    let store = SupabaseStore::new(&config.supabase_url, &config.supabase_api_key)?;

    tokio::spawn(server::serve(config.port));

    loop {
        info!("🔁 Starting scrape pass...");
        tokio::select! {
            _ = run_pass(&config, &store) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested, stopping");
                break;
            }
        }

        if config.run_once {
            info!("RUN_ONCE set, exiting after one pass");
            break;
        }

        info!("⏳ Next pass in {}s", config.interval.as_secs());
        tokio::select! {
            _ = tokio::time::sleep(config.interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested, stopping");
                break;
            }
        }
    }

    Ok(())
}

/// One scrape pass: the newest-first query for every site, then the
/// optional brand/model sweep. A fresh browser per pass keeps a
/// wedged Chrome from outliving the pass that wedged it.
async fn run_pass(config: &AppConfig, store: &SupabaseStore) {
    let browser = match BrowserNavigator::launch() {
        Ok(browser) => browser,
        Err(error) => {
            warn!("Could not launch browser, skipping pass: {:#}", error);
            return;
        }
    };

    for profile in [bilbasen::profile(), bilhandel::profile()] {
        let mut known = store.known_ids(profile.table).await;
        info!("{}: {} listings already stored", profile.name, known.len());

        pipeline::run(&browser, store, &profile, &IndexQuery::Newest, 1, &mut known).await;

        if config.model_sweep && !profile.sweep.is_empty() {
            sweep_models(store, &profile, &mut known).await;
        }
    }
}

/// Walk the profile's brand/model targets over plain HTTP, reusing the
/// known-id set the newest-first run already grew.
async fn sweep_models(store: &SupabaseStore, profile: &SiteProfile, known: &mut KnownIds) {
    let http = match HttpNavigator::new() {
        Ok(http) => http,
        Err(error) => {
            warn!("Could not build HTTP client for the sweep: {:#}", error);
            return;
        }
    };

    for (brand, model) in profile.sweep {
        info!("🔍 Sweeping {} {}", brand, model);
        let query = IndexQuery::Model(SiteTarget::new(brand, model));
        pipeline::run(&http, store, profile, &query, profile.model_page_cap, known).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}
