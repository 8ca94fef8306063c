use scraper::{Html, Selector};
use tracing::warn;

use crate::scrapers::types::SiteProfile;

/// One listing found on an index page, not yet checked against the
/// store. Ephemeral; consumed by the dedup filter and navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub url: String,
}

/// Identifier of a listing: the last non-empty path segment of its
/// canonical URL. Stable across runs and trailing slashes.
pub fn listing_id(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Parse one index page into candidates, in document order.
///
/// Containers without a resolvable link are skipped. An empty result
/// means the page had no listings; the caller ends the target's run
/// rather than treating it as an error.
pub fn discover(index_html: &str, profile: &SiteProfile) -> Vec<Candidate> {
    let container = match Selector::parse(profile.listing) {
        Ok(selector) => selector,
        Err(_) => {
            warn!("Invalid listing selector for {}: {}", profile.name, profile.listing);
            return Vec::new();
        }
    };
    let link = profile
        .listing_link
        .and_then(|selector| Selector::parse(selector).ok());

    let document = Html::parse_document(index_html);
    let mut candidates = Vec::new();

    for element in document.select(&container) {
        // Containers either wrap an anchor or are the anchor themselves.
        let href = match &link {
            Some(anchor) => element
                .select(anchor)
                .next()
                .and_then(|a| a.value().attr("href")),
            None => element.value().attr("href"),
        };
        let href = match href {
            Some(href) if !href.is_empty() => href,
            _ => continue,
        };

        let url = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", profile.base_url, href)
        };

        candidates.push(Candidate {
            id: listing_id(&url),
            url,
        });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::{bilbasen, bilhandel};

    #[test]
    fn listing_id_ignores_trailing_slash() {
        let with_slash = listing_id("https://www.bilbasen.dk/brugt/bil/abc-123/");
        let without = listing_id("https://www.bilbasen.dk/brugt/bil/abc-123");
        assert_eq!(with_slash, "abc-123");
        assert_eq!(with_slash, without);
    }

    #[test]
    fn listing_id_differs_for_distinct_listings() {
        assert_ne!(
            listing_id("https://www.bilbasen.dk/brugt/bil/abc-123"),
            listing_id("https://www.bilbasen.dk/brugt/bil/xyz-000")
        );
    }

    #[test]
    fn discovers_candidates_in_document_order() {
        let html = r#"
            <section class="srp_results__2UEV_">
              <article class="Listing_listing__XwaYe">
                <a class="Listing_link__6Z504" href="/brugt/bil/abc-123">Skoda Octavia</a>
              </article>
              <article class="Listing_listing__XwaYe">
                <a class="Listing_link__6Z504" href="https://www.bilbasen.dk/brugt/bil/xyz-000/">Audi A4</a>
              </article>
            </section>
        "#;
        let candidates = discover(html, &bilbasen::profile());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "abc-123");
        assert_eq!(candidates[0].url, "https://www.bilbasen.dk/brugt/bil/abc-123");
        assert_eq!(candidates[1].id, "xyz-000");
        assert_eq!(candidates[1].url, "https://www.bilbasen.dk/brugt/bil/xyz-000/");
    }

    #[test]
    fn skips_containers_without_a_link() {
        let html = r#"
            <article class="Listing_listing__XwaYe"><span>ad placeholder</span></article>
            <article class="Listing_listing__XwaYe">
              <a class="Listing_link__6Z504" href="/brugt/bil/abc-123">Skoda Octavia</a>
            </article>
        "#;
        let candidates = discover(html, &bilbasen::profile());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "abc-123");
    }

    #[test]
    fn empty_index_page_yields_no_candidates() {
        let candidates = discover("<html><body></body></html>", &bilbasen::profile());
        assert!(candidates.is_empty());
    }

    #[test]
    fn container_can_be_the_anchor_itself() {
        let html = r#"
            <div>
              <a href="/bil/toyota-yaris-777" class="card-listing-item">Toyota Yaris</a>
              <a href="/om-os" class="nav-link">Om os</a>
            </div>
        "#;
        let candidates = discover(html, &bilhandel::profile());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "toyota-yaris-777");
        assert_eq!(candidates[0].url, "https://bilhandel.dk/bil/toyota-yaris-777");
    }
}
