//! API client for the Rick and Morty REST API.
//!
//! Every fetch returns `Result<_, ApiError>`. Callers collapse all errors into
//! "no data"; the error value is kept so the reason can be logged.

use image::DynamicImage;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::models::{Character, LocationPage};

use super::ApiError;

/// API client for rickandmortyapi.com.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// No request timeout is applied unless the config sets one.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of one page of the location listing
    pub fn location_page_url(&self, page: u32) -> String {
        format!("{}/location?page={}", self.base_url, page)
    }

    /// GET a URL and return the response if the server answered 200.
    async fn get_ok(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::OK {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let text = self.get_ok(url).await?.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{} from {}", e, url)))
    }

    // ===== Data Fetching Methods =====

    /// Fetch one page of locations (pages start at 1)
    pub async fn fetch_location_page(&self, page: u32) -> Result<LocationPage, ApiError> {
        let url = self.location_page_url(page);
        debug!(page, url = %url, "Fetching location page");
        self.get_json(&url).await
    }

    /// Fetch a single character by its absolute resource URL
    pub async fn fetch_character(&self, url: &str) -> Result<Character, ApiError> {
        debug!(url, "Fetching character");
        self.get_json(url).await
    }

    /// Download and decode a portrait image
    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage, ApiError> {
        debug!(url, "Fetching image");
        let bytes = self.get_ok(url).await?.bytes().await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}
