use crate::{
    config::{SearchConfig, DEFAULT_SEARCH_BASE_URL, DEFAULT_SEARCH_DATASET_ID},
    engine::ReferenceSearch,
    error::{PressgenError, Result},
    models::{ImageSearchRequest, ReferenceImage},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// At most this many reference records are returned per search.
const MAX_RESULTS: usize = 10;

/// Google-Images SERP scraping client. The upstream dataset API is
/// asynchronous: a trigger call returns a snapshot id, and results are
/// collected by polling the snapshot endpoint until it stops returning 404.
pub struct ImageSearchClient {
    http: Client,
    api_key: String,
    base_url: String,
    dataset_id: String,
    language: String,
    country: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl ImageSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| PressgenError::ConfigError("Search API key is required".into()))?;

        Ok(Self {
            http: Client::new(),
            api_key,
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_SEARCH_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            dataset_id: config
                .dataset_id
                .unwrap_or_else(|| DEFAULT_SEARCH_DATASET_ID.to_string()),
            language: config.language.unwrap_or_else(|| "en".to_string()),
            country: config.country.unwrap_or_else(|| "US".to_string()),
            poll_interval: config.poll_interval,
            max_poll_attempts: config.max_poll_attempts,
        })
    }

    async fn trigger(&self, request: &ImageSearchRequest) -> Result<String> {
        let language = request.language.as_deref().unwrap_or(&self.language);
        let country = request.country.as_deref().unwrap_or(&self.country);

        let payload = json!([{
            "url": "https://www.google.com/imghp",
            "keyword": request.keyword,
            "language": language,
            "country": country,
            "start_page": request.start_page,
            "end_page": request.end_page,
        }]);

        log::info!("Searching for reference images: \"{}\"", request.keyword);

        let response = self
            .http
            .post(&format!(
                "{}/datasets/v3/trigger?dataset_id={}&include_errors=true",
                self.base_url, self.dataset_id
            ))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                PressgenError::RequestError(format!("Search trigger failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse trigger response: {}", e))
        })?;

        response_json["snapshot_id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| PressgenError::ResponseError("No snapshot_id returned".into()))
    }

    async fn poll_snapshot(&self, snapshot_id: &str) -> Result<Vec<Value>> {
        for attempt in 1..=self.max_poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .http
                .get(&format!(
                    "{}/datasets/v3/snapshot/{}?format=json",
                    self.base_url, snapshot_id
                ))
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|e| {
                    PressgenError::RequestError(format!("Snapshot poll failed: {}", e))
                })?;

            let status = response.status();
            if status.is_success() {
                let data: Value = response.json().await.map_err(|e| {
                    PressgenError::ResponseError(format!(
                        "Failed to parse snapshot response: {}",
                        e
                    ))
                })?;

                if let Some(results) = data.as_array() {
                    if !results.is_empty() {
                        log::info!("Search returned {} raw results", results.len());
                        return Ok(results.clone());
                    }
                }
            } else if status.as_u16() == 404 {
                // Snapshot not ready yet.
                log::debug!(
                    "Waiting for search results... attempt {}/{}",
                    attempt,
                    self.max_poll_attempts
                );
            } else {
                let body = response.text().await.unwrap_or_default();
                return Err(PressgenError::ApiError {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        Err(PressgenError::SearchTimeout(format!(
            "no results after {} attempts",
            self.max_poll_attempts
        )))
    }
}

#[async_trait]
impl ReferenceSearch for ImageSearchClient {
    async fn search(&self, request: ImageSearchRequest) -> Result<Vec<ReferenceImage>> {
        let snapshot_id = self.trigger(&request).await?;
        log::info!("Search triggered, snapshot_id: {}", snapshot_id);

        let results = self.poll_snapshot(&snapshot_id).await?;
        let images = extract_reference_images(&results);
        log::info!("Extracted {} image URLs from search results", images.len());

        Ok(images)
    }
}

/// Pull usable image records out of the raw dataset rows. Rows without an
/// image URL are dropped; at most [`MAX_RESULTS`] records are kept.
pub fn extract_reference_images(results: &[Value]) -> Vec<ReferenceImage> {
    let mut images = Vec::new();

    for result in results {
        let url = match result["image_url"].as_str() {
            Some(url) => url.to_string(),
            None => continue,
        };

        images.push(ReferenceImage {
            url,
            title: result["title"]
                .as_str()
                .or_else(|| result["alt_text"].as_str())
                .map(String::from),
            source: result["source_url"]
                .as_str()
                .or_else(|| result["page_url"].as_str())
                .map(String::from),
            width: result["width"].as_u64().map(|w| w as u32),
            height: result["height"].as_u64().map(|h| h as u32),
        });

        if images.len() == MAX_RESULTS {
            break;
        }
    }

    images
}
