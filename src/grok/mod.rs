pub mod image_client;
pub mod text_client;
pub mod vision_client;

use crate::{
    config::{
        GrokConfig, DEFAULT_API_BASE_URL, DEFAULT_CLASSIFIER_MODEL, DEFAULT_IMAGE_MODEL,
        DEFAULT_TEXT_MODEL, DEFAULT_VISION_MODEL,
    },
    error::{PressgenError, Result},
};
use reqwest::Client;

pub use image_client::ImageClient;
pub use text_client::TextClient;
pub use vision_client::VisionClient;

/// One handle per configured model API account. Sub-clients share a single
/// HTTP connection pool.
#[derive(Clone)]
pub struct GrokClient {
    text_client: TextClient,
    image_client: ImageClient,
    vision_client: VisionClient,
    classifier_client: TextClient,
    http: Client,
    api_key: String,
    base_url: String,
}

impl GrokClient {
    pub fn new(config: GrokConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| PressgenError::ConfigError("xAI API key is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let text_model = config
            .text_model
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());
        let image_model = config
            .image_model
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());
        let vision_model = config
            .vision_model
            .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string());
        let classifier_model = config
            .classifier_model
            .unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_string());

        let http = Client::new();

        Ok(Self {
            text_client: TextClient::new(http.clone(), &api_key, &base_url, text_model),
            image_client: ImageClient::new(http.clone(), &api_key, &base_url, image_model),
            vision_client: VisionClient::new(http.clone(), &api_key, &base_url, vision_model),
            classifier_client: TextClient::new(http.clone(), &api_key, &base_url, classifier_model),
            http,
            api_key,
            base_url,
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision_client
    }

    /// Text client defaulting to the lightweight classification model.
    pub fn classifier(&self) -> &TextClient {
        &self.classifier_client
    }

    /// Cheap authenticated probe. Never errors.
    pub async fn test_connection(&self) -> bool {
        let response = self
            .http
            .get(&format!("{}/v1/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await;

        match response {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                log::error!("Model API connection test failed: {}", e);
                false
            }
        }
    }
}
