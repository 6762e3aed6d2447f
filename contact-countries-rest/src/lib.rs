use std::time::Duration;

use contact_domain::{ServiceError, ServiceResult, country::CountryNameProvider};
use log::debug;
use serde::Deserialize;

const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v2/all?fields=name,alpha2Code";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One element of the remote payload. Everything except the two fields we
/// render is ignored; either field may be absent.
#[derive(Deserialize)]
struct CountryEntry {
    name: Option<String>,
    #[serde(rename = "alpha2Code")]
    alpha2_code: Option<String>,
}

/// Turns the JSON array into `"<name> <alpha-2 code>"` display strings in
/// source order. Entries missing either field are skipped; a payload that is
/// not an array of such objects fails the whole call.
fn parse_country_names(payload: &str) -> ServiceResult<Vec<String>> {
    let entries: Vec<CountryEntry> = serde_json::from_str(payload)
        .map_err(|e| ServiceError::Fetch(format!("malformed country payload: {}", e)))?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match (entry.name, entry.alpha2_code) {
            (Some(name), Some(code)) => Some(format!("{} {}", name, code)),
            _ => None,
        })
        .collect())
}

pub struct RestCountryNameProvider {
    url: String,
    http_client: reqwest::Client,
}

impl RestCountryNameProvider {
    /// Uses the `COUNTRIES_URL` env var, falling back to the public
    /// restcountries endpoint.
    pub fn new() -> Self {
        let url = std::env::var("COUNTRIES_URL")
            .unwrap_or_else(|_| DEFAULT_COUNTRIES_URL.to_string());
        Self::with_url(url)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            url: url.into(),
            http_client,
        }
    }
}

impl Default for RestCountryNameProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CountryNameProvider for RestCountryNameProvider {
    async fn fetch_country_names(&self) -> ServiceResult<Vec<String>> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ServiceError::Fetch(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Fetch(e.to_string()))?;
        let names = parse_country_names(&body)?;
        debug!("Fetched {} country names from {}", names.len(), self.url);
        Ok(names)
    }
}
