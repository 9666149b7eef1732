use crate::{
    error::Result,
    models::{
        ImageGenerationRequest, ImageSearchRequest, ReferenceImage, TextGenerationRequest,
        TextGenerationResponse, VisionAnalysisRequest,
    },
};
use async_trait::async_trait;

#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse>;
}

#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate a single image and return its media URL.
    async fn generate(&self, request: ImageGenerationRequest) -> Result<String>;
}

#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Describe the image behind `image_url` following the analysis prompt.
    async fn analyze(&self, request: VisionAnalysisRequest) -> Result<String>;
}

#[async_trait]
pub trait ReferenceSearch: Send + Sync {
    /// Look up real-world reference images for a keyword. An empty result is
    /// not an error.
    async fn search(&self, request: ImageSearchRequest) -> Result<Vec<ReferenceImage>>;
}
