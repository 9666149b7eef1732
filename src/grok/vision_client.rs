use crate::{
    engine::VisionModel,
    error::{PressgenError, Result},
    models::VisionAnalysisRequest,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct VisionClient {
    http: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl VisionClient {
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
impl VisionModel for VisionClient {
    async fn analyze(&self, request: VisionAnalysisRequest) -> Result<String> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);

        let payload = json!({
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": request.image_url
                            }
                        },
                        {
                            "type": "text",
                            "text": request.prompt
                        }
                    ]
                }
            ],
            "model": model,
            "temperature": 0.5,
        });

        log::info!("Analyzing image with model: {}", model);

        let response = self
            .http
            .post(&format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Vision request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Vision API error: {} {}", status, body);
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse vision response: {}", e))
        })?;

        response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| PressgenError::ResponseError("No analysis returned".into()))
    }
}
