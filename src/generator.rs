use crate::{
    config::GenerationConfig,
    engine::{ImageStrategyEngine, TextModel},
    error::Result,
    models::{
        BatchItemOutcome, BatchReport, ContentRequest, GeneratedArticle, GeneratedContent,
        GenerationRequest, TextGenerationRequest, TokenStats,
    },
};
use std::sync::Arc;

/// Hard cap on keywords processed per batch call. Anything beyond it is
/// dropped and reported as truncated.
pub const MAX_BATCH_SIZE: usize = 10;

fn content_system_prompt(content_type: &str, tone: &str) -> String {
    format!(
        "You are an expert content writer. Generate high-quality, SEO-optimized {} content in a {} tone. Return ONLY a valid JSON object with the following structure:\n{{\n  \"title\": \"engaging title\",\n  \"body\": \"full article content in HTML format\",\n  \"metaDescription\": \"brief description for SEO\",\n  \"tags\": [\"tag1\", \"tag2\", \"tag3\"],\n  \"categories\": [\"category1\"]\n}}",
        content_type, tone
    )
}

/// Parse the model's article JSON, tolerating markdown code fences. A
/// response that is not valid JSON still yields an article: the raw text
/// becomes the body and the remaining fields are derived from the keywords.
pub fn parse_generated_content(raw: &str, keywords: &str) -> GeneratedContent {
    let cleaned = raw.replace("```json", "").replace("```", "");
    match serde_json::from_str::<GeneratedContent>(cleaned.trim()) {
        Ok(content) => content,
        Err(_) => GeneratedContent {
            title: keywords.to_string(),
            body: raw.to_string(),
            meta_description: Some(keywords.chars().take(160).collect()),
            tags: keywords
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .take(5)
                .collect(),
            categories: vec!["General".to_string()],
            token_usage: None,
        },
    }
}

/// Host flow for one article: text generation, image strategy engine, token
/// stats. Image generation is best-effort; an article is still produced when
/// every image attempt failed.
pub struct ContentGenerator {
    text: Arc<dyn TextModel>,
    engine: ImageStrategyEngine,
    config: GenerationConfig,
}

impl ContentGenerator {
    pub fn new(
        text: Arc<dyn TextModel>,
        engine: ImageStrategyEngine,
        config: GenerationConfig,
    ) -> Self {
        Self {
            text,
            engine,
            config,
        }
    }

    /// Generate the article text only.
    pub async fn generate_content(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        let content_type = request.content_type.as_deref().unwrap_or("blog post");
        let tone = request.tone.as_deref().unwrap_or("professional");
        let length = request.length.unwrap_or(self.config.content_length);
        let model = request
            .model
            .clone()
            .or_else(|| {
                if self.config.use_cheaper_model {
                    Some(self.config.text_model_label().to_string())
                } else {
                    None
                }
            });

        log::info!(
            "📝 Generating content with model: {}",
            model.as_deref().unwrap_or("default")
        );

        let response = self
            .text
            .complete(TextGenerationRequest {
                system_prompt: content_system_prompt(content_type, tone),
                user_prompt: format!(
                    "Create a {}-word {} about: {}",
                    length, content_type, request.keywords
                ),
                model,
                temperature: Some(0.7),
            })
            .await?;

        let mut content = parse_generated_content(&response.text, &request.keywords);
        content.token_usage = Some(response.usage);
        Ok(content)
    }

    /// Generate one full article: text, then images through the strategy
    /// engine, then the usage record.
    pub async fn generate_article(&self, keywords: &str) -> Result<GeneratedArticle> {
        let content = self
            .generate_content(&ContentRequest::new(keywords))
            .await?;

        log::info!(
            "🤖 Starting intelligent image generation for: {}",
            content.title
        );
        let request = GenerationRequest::from_config(keywords, &content.title, &self.config);
        let outcome = self.engine.decide_and_generate(&request).await;

        let featured_image_url = outcome.images.first().map(|image| image.url.clone());
        let token_stats = TokenStats {
            content: content.token_usage.clone().unwrap_or_default(),
            image_count: outcome.images.len(),
            workflow: self.config.workflow_label().to_string(),
            model: self.config.text_model_label().to_string(),
        };
        log::info!(
            "📊 Token usage: {} total, {} images, workflow {}",
            token_stats.content.total_tokens,
            token_stats.image_count,
            token_stats.workflow
        );

        Ok(GeneratedArticle {
            content,
            images: outcome.images,
            featured_image_url,
            token_stats,
        })
    }

    /// Sequential text-only generation over at most [`MAX_BATCH_SIZE`]
    /// keywords. A failed keyword is counted and skipped, never fatal. The
    /// `on_item` sink runs after each keyword so callers can persist
    /// incremental progress.
    pub async fn generate_batch<F>(&self, keywords: &[String], mut on_item: F) -> BatchReport
    where
        F: FnMut(&BatchItemOutcome),
    {
        let truncated = keywords.len() > MAX_BATCH_SIZE;
        if truncated {
            log::warn!(
                "Batch of {} keywords truncated to {}",
                keywords.len(),
                MAX_BATCH_SIZE
            );
        }
        let to_process = &keywords[..keywords.len().min(MAX_BATCH_SIZE)];

        let mut items = Vec::new();
        let mut succeeded = 0;
        let mut failed = 0;

        for keyword in to_process {
            let outcome = match self.generate_content(&ContentRequest::new(keyword)).await {
                Ok(content) => {
                    succeeded += 1;
                    BatchItemOutcome {
                        keyword: keyword.clone(),
                        success: true,
                        title: Some(content.title),
                        error: None,
                    }
                }
                Err(e) => {
                    log::error!("Error processing keyword \"{}\": {}", keyword, e);
                    failed += 1;
                    BatchItemOutcome {
                        keyword: keyword.clone(),
                        success: false,
                        title: None,
                        error: Some(e.to_string()),
                    }
                }
            };

            on_item(&outcome);
            items.push(outcome);
        }

        BatchReport {
            total_requested: keywords.len(),
            processed: to_process.len(),
            succeeded,
            failed,
            truncated,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ImageModel, ReferenceSearch, VisionModel};
    use crate::error::PressgenError;
    use crate::models::{
        ImageGenerationRequest, ImageSearchRequest, ReferenceImage, TextGenerationResponse,
        TokenUsage, VisionAnalysisRequest,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const ARTICLE_JSON: &str = r#"{
        "title": "Handmade Teapots",
        "body": "<p>one</p><p>two</p>",
        "metaDescription": "All about teapots",
        "tags": ["teapots", "crafts"],
        "categories": ["Home"]
    }"#;

    struct ScriptedText {
        calls: AtomicUsize,
        fail_on: Vec<usize>,
    }

    impl ScriptedText {
        fn new(fail_on: &[usize]) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_on: fail_on.to_vec(),
            })
        }
    }

    #[async_trait]
    impl TextModel for ScriptedText {
        async fn complete(
            &self,
            _request: TextGenerationRequest,
        ) -> crate::error::Result<TextGenerationResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&call) {
                return Err(PressgenError::ApiError {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(TextGenerationResponse {
                text: ARTICLE_JSON.to_string(),
                model: "fake".to_string(),
                usage: TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                },
            })
        }
    }

    struct IdleImage;

    #[async_trait]
    impl ImageModel for IdleImage {
        async fn generate(&self, _request: ImageGenerationRequest) -> crate::error::Result<String> {
            Ok("https://img.example/gen.png".to_string())
        }
    }

    struct IdleVision;

    #[async_trait]
    impl VisionModel for IdleVision {
        async fn analyze(&self, _request: VisionAnalysisRequest) -> crate::error::Result<String> {
            Ok("analysis".to_string())
        }
    }

    struct IdleSearch;

    #[async_trait]
    impl ReferenceSearch for IdleSearch {
        async fn search(
            &self,
            _request: ImageSearchRequest,
        ) -> crate::error::Result<Vec<ReferenceImage>> {
            Ok(vec![])
        }
    }

    fn generator(text: Arc<ScriptedText>) -> ContentGenerator {
        let config = GenerationConfig::new()
            .with_image_count(1)
            .with_pacing(Duration::ZERO, Duration::ZERO);
        let engine = ImageStrategyEngine::new(
            text.clone(),
            Arc::new(IdleImage),
            Arc::new(IdleVision),
            Arc::new(IdleSearch),
            config.clone(),
        );
        ContentGenerator::new(text, engine, config)
    }

    #[test]
    fn test_parse_valid_article_json() {
        let content = parse_generated_content(ARTICLE_JSON, "artisan teapot");
        assert_eq!(content.title, "Handmade Teapots");
        assert_eq!(content.tags, vec!["teapots", "crafts"]);
        assert_eq!(content.meta_description.as_deref(), Some("All about teapots"));
    }

    #[test]
    fn test_parse_fenced_article_json() {
        let fenced = format!("```json\n{}\n```", ARTICLE_JSON);
        let content = parse_generated_content(&fenced, "artisan teapot");
        assert_eq!(content.title, "Handmade Teapots");
    }

    #[test]
    fn test_parse_fallback_shape() {
        let content = parse_generated_content(
            "Teapots are great. Here is an essay about them.",
            "artisan teapot, ceramics, pottery, glaze, kiln, wheel, clay",
        );

        assert_eq!(
            content.title,
            "artisan teapot, ceramics, pottery, glaze, kiln, wheel, clay"
        );
        assert_eq!(content.body, "Teapots are great. Here is an essay about them.");
        assert_eq!(content.categories, vec!["General"]);
        // Comma-split keywords, capped at five.
        assert_eq!(
            content.tags,
            vec!["artisan teapot", "ceramics", "pottery", "glaze", "kiln"]
        );
    }

    #[tokio::test]
    async fn test_generate_article_attaches_stats_and_featured_image() {
        let article = generator(ScriptedText::new(&[]))
            .generate_article("artisan teapot")
            .await
            .unwrap();

        assert_eq!(article.content.title, "Handmade Teapots");
        assert_eq!(article.images.len(), 1);
        assert_eq!(
            article.featured_image_url.as_deref(),
            Some("https://img.example/gen.png")
        );
        assert_eq!(article.token_stats.content.total_tokens, 30);
        assert_eq!(article.token_stats.image_count, 1);
    }

    #[tokio::test]
    async fn test_batch_caps_at_ten_and_tolerates_failures() {
        let keywords: Vec<String> = (0..12).map(|i| format!("keyword {}", i)).collect();
        // Third keyword fails; the batch keeps going.
        let mut seen = 0;
        let report = generator(ScriptedText::new(&[3]))
            .generate_batch(&keywords, |_| seen += 1)
            .await;

        assert_eq!(report.total_requested, 12);
        assert_eq!(report.processed, 10);
        assert!(report.truncated);
        assert_eq!(report.succeeded, 9);
        assert_eq!(report.failed, 1);
        assert_eq!(seen, 10);
        assert!(!report.items[2].success);
        assert!(report.items[3].success);
    }
}
