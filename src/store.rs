use std::collections::HashSet;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::Listing;

/// Identifiers already present in the store. Loaded once per site run,
/// grown in memory after each successful write so a listing is never
/// reprocessed within a pass, pagination included.
#[derive(Debug, Default)]
pub struct KnownIds(HashSet<String>);

impl KnownIds {
    pub fn is_new(&self, id: &str) -> bool {
        !self.0.contains(id)
    }

    pub fn insert(&mut self, id: String) {
        self.0.insert(id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for KnownIds {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of writing one record.
#[derive(Debug)]
pub enum WriteOutcome {
    Saved,
    /// Non-2xx response. The write is not retried; retrying a create
    /// risks duplicate rows.
    Rejected(StatusCode),
    /// The request never completed.
    Failed(String),
}

#[derive(Deserialize)]
struct IdRow {
    id: String,
}

/// REST client for the remote store. One client carries the auth
/// headers for every request.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .context("API key is not a valid header value")?,
        );
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .context("Failed to create store client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// All identifiers currently stored in `table`.
    ///
    /// Any failure degrades to an empty set so the run proceeds; the
    /// cost is re-fetching listings the store already has, which the
    /// writer then rejects on its unique key.
    pub async fn known_ids(&self, table: &str) -> KnownIds {
        let url = format!("{}/rest/v1/{}?select=id", self.base_url, table);
        let rows: Result<Vec<IdRow>> = async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .context("Request failed")?;
            if !response.status().is_success() {
                bail!("store returned {}", response.status());
            }
            response.json().await.context("Malformed id rows")
        }
        .await;

        match rows {
            Ok(rows) => {
                debug!("Loaded {} known ids from {}", rows.len(), table);
                rows.into_iter().map(|row| row.id).collect()
            }
            Err(error) => {
                warn!("Could not load known ids from {}: {:#}", table, error);
                KnownIds::default()
            }
        }
    }

    /// Insert one record into `table` and classify the outcome.
    pub async fn insert(&self, table: &str, listing: &Listing) -> WriteOutcome {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        match self.client.post(&url).json(listing).send().await {
            Ok(response) if response.status().is_success() => WriteOutcome::Saved,
            Ok(response) => WriteOutcome::Rejected(response.status()),
            Err(error) => WriteOutcome::Failed(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing(id: &str) -> Listing {
        Listing::sparse(
            id,
            &format!("https://www.bilbasen.dk/brugt/bil/{id}"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[tokio::test]
    async fn known_ids_come_from_the_id_column() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/bilbasen_cars"))
            .and(query_param("select", "id"))
            .and(header("apikey", "secret"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": "abc-123"}, {"id": "xyz-000"}])),
            )
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "secret").unwrap();
        let known = store.known_ids("bilbasen_cars").await;

        assert_eq!(known.len(), 2);
        assert!(!known.is_new("abc-123"));
        assert!(!known.is_new("xyz-000"));
        assert!(known.is_new("fresh-789"));
    }

    #[tokio::test]
    async fn known_ids_degrade_to_empty_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/bilbasen_cars"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "secret").unwrap();
        let known = store.known_ids("bilbasen_cars").await;
        assert!(known.is_empty());
    }

    #[tokio::test]
    async fn known_ids_degrade_to_empty_on_malformed_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/bilbasen_cars"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "secret").unwrap();
        let known = store.known_ids("bilbasen_cars").await;
        assert!(known.is_empty());
    }

    #[tokio::test]
    async fn insert_classifies_a_created_row_as_saved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/bilbasen_cars"))
            .and(header("apikey", "secret"))
            .and(header("prefer", "return=representation"))
            .and(body_partial_json(json!({"identifier": "abc-123"})))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "secret").unwrap();
        let outcome = store.insert("bilbasen_cars", &listing("abc-123")).await;
        assert!(matches!(outcome, WriteOutcome::Saved));
    }

    #[tokio::test]
    async fn insert_classifies_a_non_2xx_as_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/bilbasen_cars"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "secret").unwrap();
        let outcome = store.insert("bilbasen_cars", &listing("abc-123")).await;
        assert!(matches!(outcome, WriteOutcome::Rejected(StatusCode::CONFLICT)));
    }

    #[tokio::test]
    async fn insert_classifies_a_transport_error_as_failed() {
        // Nothing listens on the discard port.
        let store = SupabaseStore::new("http://127.0.0.1:9", "secret").unwrap();
        let outcome = store.insert("bilbasen_cars", &listing("abc-123")).await;
        assert!(matches!(outcome, WriteOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/bilbasen_cars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "abc-123"}])))
            .mount(&server)
            .await;

        let base = format!("{}/", server.uri());
        let store = SupabaseStore::new(&base, "secret").unwrap();
        let known = store.known_ids("bilbasen_cars").await;
        assert_eq!(known.len(), 1);
    }
}
