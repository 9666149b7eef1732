use crate::{
    engine::TextModel,
    error::{PressgenError, Result},
    models::{TextGenerationRequest, TextGenerationResponse, TokenUsage},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct TextClient {
    http: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl TextClient {
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
impl TextModel for TextClient {
    async fn complete(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);

        let payload = json!({
            "messages": [
                {
                    "role": "system",
                    "content": request.system_prompt
                },
                {
                    "role": "user",
                    "content": request.user_prompt
                }
            ],
            "model": model,
            "stream": false,
            "temperature": request.temperature.unwrap_or(0.7),
        });

        log::info!("Invoking text model: {}", model);
        log::debug!("Text generation payload: {}", payload);

        let response = self
            .http
            .post(&format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Text request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Text API error: {} {}", status, body);
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse text response: {}", e))
        })?;

        let text = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| PressgenError::ResponseError("No content generated".into()))?
            .to_string();

        let usage: TokenUsage =
            serde_json::from_value(response_json["usage"].clone()).unwrap_or_default();

        Ok(TextGenerationResponse {
            text,
            model: model.to_string(),
            usage,
        })
    }
}
