use serde::{Deserialize, Serialize};

use super::image::GeneratedImage;

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRequest {
    pub keywords: String,
    pub content_type: Option<String>,
    pub tone: Option<String>,
    pub length: Option<u32>,
    pub model: Option<String>,
}

impl ContentRequest {
    pub fn new(keywords: impl Into<String>) -> Self {
        ContentRequest {
            keywords: keywords.into(),
            content_type: None,
            tone: None,
            length: None,
            model: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// The structured article shape the text model is asked to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(skip)]
    pub token_usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextGenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationResponse {
    pub text: String,
    pub model: String,
    pub usage: TokenUsage,
}

/// Per-article usage record attached to the persisted content entry.
#[derive(Debug, Clone, Serialize)]
pub struct TokenStats {
    pub content: TokenUsage,
    pub image_count: usize,
    pub workflow: String,
    pub model: String,
}

/// Complete output of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArticle {
    pub content: GeneratedContent,
    pub images: Vec<GeneratedImage>,
    pub featured_image_url: Option<String>,
    pub token_stats: TokenStats,
}
