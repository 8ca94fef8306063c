use chrono::Utc;
use tracing::{debug, info, warn};

use crate::scrapers::{discover, extract, IndexQuery, Navigator, SiteProfile};
use crate::store::{KnownIds, SupabaseStore, WriteOutcome};

/// Counters for one target's run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Candidates seen on index pages.
    pub discovered: usize,
    /// Candidates that passed the dedup filter.
    pub unseen: usize,
    pub saved: usize,
    pub failed: usize,
}

/// Drive one target (site and query) through discovery, dedup,
/// navigation, extraction and writes.
///
/// Pages ascend from 1 until one yields no candidates or `max_pages`
/// is reached. A single candidate's failure is contained: it is
/// counted and the loop moves on. The function itself never errors;
/// it always runs the target to completion.
pub async fn run(
    navigator: &dyn Navigator,
    store: &SupabaseStore,
    profile: &SiteProfile,
    query: &IndexQuery,
    max_pages: usize,
    known: &mut KnownIds,
) -> RunReport {
    let mut report = RunReport::default();

    for page in 1..=max_pages {
        let index_url = match profile.index_url(query, page) {
            Some(url) => url,
            None => {
                warn!("{} cannot serve {:?}", profile.name, query);
                break;
            }
        };

        let index_html = match navigator
            .fetch(&index_url, profile.index_ready, profile.index_wait, profile.consent_text)
            .await
        {
            Ok(html) => html,
            Err(error) => {
                warn!("Index fetch failed for {}: {:#}", profile.name, error);
                break;
            }
        };

        let candidates = discover(&index_html, profile);
        if candidates.is_empty() {
            info!("No listings found on {} page {}", profile.name, page);
            break;
        }
        info!("🔍 Found {} listings on {} page {}", candidates.len(), profile.name, page);
        report.discovered += candidates.len();

        for candidate in candidates {
            if !known.is_new(&candidate.id) {
                debug!("Skipping known listing {}", candidate.id);
                continue;
            }
            report.unseen += 1;

            let detail_html = match navigator
                .fetch(&candidate.url, profile.detail_ready, profile.detail_wait, None)
                .await
            {
                Ok(html) => html,
                Err(error) => {
                    warn!("Skipping {}: {:#}", candidate.url, error);
                    report.failed += 1;
                    continue;
                }
            };

            let today = Utc::now().date_naive();
            let listing = extract(&detail_html, &candidate.url, &candidate.id, profile, today);

            match store.insert(profile.table, &listing).await {
                WriteOutcome::Saved => {
                    info!("✅ Saved {} {} - {}", listing.brand, listing.model, listing.price);
                    known.insert(candidate.id);
                    report.saved += 1;
                }
                WriteOutcome::Rejected(status) => {
                    warn!("Store rejected {}: {}", candidate.id, status);
                    report.failed += 1;
                }
                WriteOutcome::Failed(error) => {
                    warn!("Write failed for {}: {}", candidate.id, error);
                    report.failed += 1;
                }
            }
        }
    }

    info!(
        "{} done: {} discovered, {} new, {} saved, {} failed",
        profile.name, report.discovered, report.unseen, report.saved, report.failed
    );
    report
}
