use crate::error::{FetchError, Result};
use crate::record::{CharacterPage, CharacterRecord};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Read-only access to a character collection.
///
/// Indexes are 0-based positions in the upstream collection. Implementations
/// must not retry or cache.
pub trait CharacterSource {
    /// Every record from the listing endpoint, in upstream order.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<CharacterRecord>>> + Send;

    /// The total number of records upstream.
    fn fetch_count(&self) -> impl Future<Output = Result<u64>> + Send;

    /// A single record, or `FetchError::NotFound` when `index` is out of range.
    fn fetch_one(&self, index: u64) -> impl Future<Output = Result<CharacterRecord>> + Send;
}

#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = Client::builder()
            .user_agent(concat!("charcards/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout).connect_timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn listing_url(&self) -> String {
        format!("{}/character", self.base_url)
    }

    // Upstream ids start at 1.
    fn character_url(&self, index: u64) -> Option<String> {
        let id = index.checked_add(1)?;
        Some(format!("{}/character/{}", self.base_url, id))
    }

    async fn fetch_page(&self) -> Result<CharacterPage> {
        let url = self.listing_url();
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let page: CharacterPage = parse_body(&body)?;
        debug!(
            "Listing returned {} records (count {})",
            page.results.len(),
            page.info.count
        );
        Ok(page)
    }
}

impl CharacterSource for Fetcher {
    async fn fetch_all(&self) -> Result<Vec<CharacterRecord>> {
        let page = self.fetch_page().await?;
        info!("Fetched {} characters from {}", page.results.len(), self.base_url);
        Ok(page.results)
    }

    async fn fetch_count(&self) -> Result<u64> {
        Ok(self.fetch_page().await?.info.count)
    }

    async fn fetch_one(&self, index: u64) -> Result<CharacterRecord> {
        let url = self
            .character_url(index)
            .ok_or(FetchError::NotFound { index })?;
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No character at index {}", index);
            return Err(FetchError::NotFound { index });
        }

        let body = response.error_for_status()?.text().await?;
        parse_body(&body)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            base_url,
            parsed.scheme()
        )));
    }

    // Endpoints are appended to the path, so a query or fragment would swallow them
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(FetchError::InvalidUrl(format!(
            "{}: query strings and fragments are not supported",
            base_url
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn listing_body() -> String {
        r#"{
            "info": {"count": 3, "pages": 1, "next": null, "prev": null},
            "results": [
                {"id": 1, "name": "Rick Sanchez", "species": "Human", "image": "https://img.test/1.jpeg"},
                {"id": 2, "name": "Morty Smith", "species": "Human", "image": "https://img.test/2.jpeg"},
                {"id": 3, "name": "Birdperson", "species": "Bird-Person", "image": "https://img.test/3.jpeg"}
            ]
        }"#
        .to_string()
    }

    async fn mount_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/character"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string(listing_body()),
            )
            .mount(server)
            .await;
    }

    fn fetcher_for(server: &MockServer) -> Fetcher {
        Fetcher::new(&format!("{}/api", server.uri())).unwrap()
    }

    #[test]
    fn test_normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://example.com/api/").unwrap(),
            "https://example.com/api"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8080").unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://example.com/api"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_base_url_with_query_or_fragment_rejected() {
        assert!(matches!(
            Fetcher::new("https://example.com/api?key=abc"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            Fetcher::new("https://example.com/api#top"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_character_url_is_one_based() {
        let fetcher = Fetcher::new("https://example.com/api").unwrap();
        assert_eq!(
            fetcher.character_url(0).as_deref(),
            Some("https://example.com/api/character/1")
        );
        assert_eq!(
            fetcher.character_url(41).as_deref(),
            Some("https://example.com/api/character/42")
        );
        assert!(fetcher.character_url(u64::MAX).is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order() {
        let server = MockServer::start().await;
        mount_listing(&server).await;

        let records = fetcher_for(&server).fetch_all().await.unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rick Sanchez", "Morty Smith", "Birdperson"]);
        assert_eq!(records[2].species, "Bird-Person");
        assert_eq!(records[0].image_url, "https://img.test/1.jpeg");
    }

    #[tokio::test]
    async fn test_fetch_count() {
        let server = MockServer::start().await;
        mount_listing(&server).await;

        let count = fetcher_for(&server).fetch_count().await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_fetch_one_requests_next_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id": 2, "name": "Morty Smith", "species": "Human", "image": "https://img.test/2.jpeg"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let record = fetcher_for(&server).fetch_one(1).await.unwrap();
        assert_eq!(
            record,
            CharacterRecord::new("Morty Smith", "Human", "https://img.test/2.jpeg")
        );
    }

    #[tokio::test]
    async fn test_fetch_one_out_of_range_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character/900"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error": "Character not found"}"#),
            )
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_one(899).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { index: 899 }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_one_missing_field_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"name": "Rick Sanchez"}"#),
            )
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_one(0).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_listing_not_json_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_all().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_count().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 1 is reserved and nothing listens on it
        let fetcher =
            Fetcher::with_timeout("http://127.0.0.1:1/api", Some(Duration::from_secs(2))).unwrap();

        let err = fetcher.fetch_all().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
    }
}
