use std::future::Future;
use std::time::Duration;

use log::debug;

use crate::clients::{
    entities::{MusicRecord, decode_response},
    errors::{Error, Result},
};

pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const MEDIA_PARAM: &str = "media=music";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client whose requests give up after `timeout`.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

// Same as http_client(DEFAULT_TIMEOUT) for infallible constructors
pub(crate) fn default_http_client() -> reqwest::Client {
    http_client(DEFAULT_TIMEOUT).unwrap_or_else(|e| {
        debug!("Falling back to a plain HTTP client: {e}");
        reqwest::Client::new()
    })
}

/// Anything that can turn a search term into decoded music records.
///
/// Each call is independent: no caching, retry or deduplication of
/// identical concurrent searches.
pub trait MusicSearch: Send + Sync + 'static {
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<MusicRecord>>> + Send;
}

/// iTunes Search API client.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    http: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        ItunesClient {
            http,
            base_url: base_url.into(),
        }
    }

    // Create a client for MUSICLIST_SEARCH_URL, or the public endpoint when the variable is unset
    pub fn try_default() -> Result<Self> {
        Self::from_env(DEFAULT_TIMEOUT)
    }

    pub fn from_env(timeout: Duration) -> Result<Self> {
        let base_url = base_url_from(std::env::var("MUSICLIST_SEARCH_URL"))?;
        Ok(Self::new(http_client(timeout)?, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self, term: &str) -> String {
        build_search_url(&self.base_url, term)
    }
}

impl Default for ItunesClient {
    fn default() -> Self {
        Self::new(default_http_client(), DEFAULT_SEARCH_URL)
    }
}

impl MusicSearch for ItunesClient {
    async fn search(&self, term: &str) -> Result<Vec<MusicRecord>> {
        let url = self.search_url(term);
        debug!("Searching iTunes: {url}");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(Error::EmptyBody);
        }

        let decoded = decode_response(&body)?;
        debug!("Decoded {} records for {term:?}", decoded.results.len());
        Ok(decoded.results)
    }
}

// Resolve the MUSICLIST_SEARCH_URL lookup into a base endpoint
fn base_url_from(var: std::result::Result<String, std::env::VarError>) -> Result<String> {
    let base_url = match var {
        Ok(url) => url,
        Err(std::env::VarError::NotPresent) => return Ok(DEFAULT_SEARCH_URL.to_string()),
        Err(e) => return Err(e.into()),
    };
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::Configuration(format!(
            "MUSICLIST_SEARCH_URL must be an http(s) URL, got {base_url:?}"
        )));
    }
    Ok(base_url)
}

/// `<base>?media=music&term=<escaped term>`
pub fn build_search_url(base_url: &str, term: &str) -> String {
    let base = base_url.trim_end_matches(['?', '&']);
    let separator = if base.contains('?') { '&' } else { '?' };
    format!(
        "{base}{separator}{MEDIA_PARAM}&term={}",
        urlencoding::encode(term)
    )
}
