use crate::{
    engine::ImageModel,
    error::{PressgenError, Result},
    models::ImageGenerationRequest,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct ImageClient {
    http: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl ImageClient {
    pub fn new(
        http: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            default_model: default_model.into(),
        }
    }
}

#[async_trait]
impl ImageModel for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<String> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);

        let payload = json!({
            "model": model,
            "prompt": request.prompt,
            "n": 1,
        });

        log::info!("Generating image with model: {}", model);

        let response = self
            .http
            .post(&format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Image request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Image API error: {} {}", status, body);
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse image response: {}", e))
        })?;

        response_json["data"][0]["url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| PressgenError::ResponseError("No image URL returned".into()))
    }
}
