use std::time::Duration;

/// One brand/model pair for the sweep mode, driving a parametrized
/// index URL with its own pagination loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTarget {
    pub brand: String,
    pub model: String,
}

impl SiteTarget {
    pub fn new(brand: &str, model: &str) -> Self {
        Self {
            brand: brand.to_string(),
            model: model.to_string(),
        }
    }
}

/// Which index page a run walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexQuery {
    /// The site's newest-first search results.
    Newest,
    /// The search results for one brand/model pair.
    Model(SiteTarget),
}

/// Extraction rules for one site's detail pages.
///
/// Selectors and label vocabularies are pinned to a site revision and
/// swapped out here when the markup changes; extraction code applies a
/// rule and defaults to empty on no match, it never names a site.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub title: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub images: &'static str,
    /// Keep only image sources containing this substring.
    pub image_src_filter: Option<&'static str>,
    /// Row selectors parsed, in order, into one label→value list
    /// (header cell paired with data cell, incomplete rows skipped).
    pub label_rows: &'static [&'static str],
    /// Row and cell selectors for the equipment section; cell text is
    /// collected in document order and joined for display.
    pub equipment_rows: Option<&'static str>,
    pub equipment_cells: Option<&'static str>,
    /// Selector for free-form spec items classified by keyword.
    pub spec_items: Option<&'static str>,
    /// Marker phrase preceding the posting date in a text node.
    pub posted_marker: Option<&'static str>,
    /// chrono format for the posting date, e.g. `%d.%m.%Y`.
    pub posted_date_format: &'static str,
    /// Marker phrases for the seller-type heuristic, checked in order
    /// against the raw page markup.
    pub private_marker: Option<&'static str>,
    pub dealer_marker: Option<&'static str>,
    // Label substrings for fields derived from the label→value list.
    // A row matches when its label contains any needle; the first
    // matching row in document order wins.
    pub model_year_labels: &'static [&'static str],
    pub mileage_labels: &'static [&'static str],
    pub fuel_labels: &'static [&'static str],
    pub body_category_labels: &'static [&'static str],
    pub body_type_labels: &'static [&'static str],
    pub weight_labels: &'static [&'static str],
    pub width_labels: &'static [&'static str],
    pub door_count_labels: &'static [&'static str],
    pub horsepower_labels: &'static [&'static str],
    pub transmission_labels: &'static [&'static str],
    pub location_labels: &'static [&'static str],
    // Keywords for classifying lowercased spec items. Later matching
    // items overwrite earlier ones.
    pub model_year_keywords: &'static [&'static str],
    pub mileage_keywords: &'static [&'static str],
    pub fuel_keywords: &'static [&'static str],
}

/// Everything the pipeline needs to know about one site: URLs, wait
/// budgets, discovery selectors, the store table, and the field rules.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub name: &'static str,
    pub base_url: &'static str,
    /// Store collection the site's records are written to.
    pub table: &'static str,
    /// Newest-first search results URL.
    pub newest_url: &'static str,
    /// Brand/model search template with `{brand}`, `{model}` and
    /// `{page}` placeholders. Absent for sites without such a scheme.
    pub model_url: Option<&'static str>,
    /// Page cap for one brand/model pagination loop.
    pub model_page_cap: usize,
    /// Brand/model pairs walked in sweep mode. Empty when the site has
    /// no model URL scheme.
    pub sweep: &'static [(&'static str, &'static str)],
    /// Listing container selector on the index page.
    pub listing: &'static str,
    /// Anchor selector inside a container. Absent when the container
    /// itself is the anchor.
    pub listing_link: Option<&'static str>,
    /// Marker distinguishing "results rendered" from "page shell".
    pub index_ready: &'static str,
    pub detail_ready: &'static str,
    pub index_wait: Duration,
    pub detail_wait: Duration,
    /// Button text of the cookie-consent overlay, dismissed best-effort.
    pub consent_text: Option<&'static str>,
    pub fields: FieldRules,
}

impl SiteProfile {
    /// Build the index URL for a query and 1-based page number.
    /// Returns `None` when the site cannot serve the query.
    pub fn index_url(&self, query: &IndexQuery, page: usize) -> Option<String> {
        match query {
            IndexQuery::Newest => {
                if page <= 1 {
                    Some(self.newest_url.to_string())
                } else {
                    Some(format!("{}&page={}", self.newest_url, page))
                }
            }
            IndexQuery::Model(target) => self.model_url.map(|template| {
                template
                    .replace("{brand}", &target.brand)
                    .replace("{model}", &target.model)
                    .replace("{page}", &page.to_string())
            }),
        }
    }
}
