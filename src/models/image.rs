use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

/// One image-generation run, scoped to a single article.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub keyword: String,
    pub title: String,
    pub budget_mode: bool,
    pub skip_enhanced: bool,
    pub image_count: u32,
}

impl GenerationRequest {
    /// Build a request from the resolved configuration. Explicit `with_*`
    /// overrides win over the configuration values.
    pub fn from_config(
        keyword: impl Into<String>,
        title: impl Into<String>,
        config: &GenerationConfig,
    ) -> Self {
        GenerationRequest {
            keyword: keyword.into(),
            title: title.into(),
            budget_mode: config.budget_mode,
            skip_enhanced: config.skip_enhanced,
            image_count: config.image_count,
        }
    }

    pub fn with_budget_mode(mut self, enabled: bool) -> Self {
        self.budget_mode = enabled;
        self
    }

    pub fn with_skip_enhanced(mut self, enabled: bool) -> Self {
        self.skip_enhanced = enabled;
        self
    }

    pub fn with_image_count(mut self, count: u32) -> Self {
        self.image_count = count;
        self
    }
}

/// Classifier answer for one keyword/title pair. Advisory: budget mode and
/// skip-enhanced always force the standard workflow regardless of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDecision {
    #[serde(rename = "useEnhanced")]
    pub use_enhanced: bool,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub url: String,
    pub title: Option<String>,
    pub source: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// The unit of engine output. Index 0 in a result list is the featured image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub alt: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: Option<String>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        ImageGenerationRequest {
            prompt: prompt.into(),
            model: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionAnalysisRequest {
    pub image_url: String,
    pub prompt: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSearchRequest {
    pub keyword: String,
    pub language: Option<String>,
    pub country: Option<String>,
    pub start_page: u32,
    pub end_page: u32,
}

impl ImageSearchRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        ImageSearchRequest {
            keyword: keyword.into(),
            language: None,
            country: None,
            start_page: 1,
            end_page: 3,
        }
    }

    pub fn with_pages(mut self, start_page: u32, end_page: u32) -> Self {
        self.start_page = start_page;
        self.end_page = end_page;
        self
    }
}

/// Which pipeline actually produced the images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Standard,
    Enhanced,
}

/// Engine result: zero or more images plus the decision record for logging.
#[derive(Debug, Clone, Serialize)]
pub struct EngineOutcome {
    pub images: Vec<GeneratedImage>,
    pub decision: StrategyDecision,
    pub workflow: Workflow,
}
