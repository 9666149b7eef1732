pub mod prompts;
pub mod traits;

pub use traits::{ImageModel, ReferenceSearch, TextModel, VisionModel};

use crate::{
    config::GenerationConfig,
    error::Result,
    models::{
        EngineOutcome, GeneratedImage, GenerationRequest, ImageGenerationRequest,
        ImageSearchRequest, ReferenceImage, StrategyDecision, TextGenerationRequest,
        VisionAnalysisRequest, Workflow,
    },
};
use std::sync::Arc;

pub const FALLBACK_REASONING: &str = "Analysis failed, using standard generation as fallback";
pub const FORCED_STANDARD_REASONING: &str =
    "Budget mode or skip-enhanced set, standard generation forced";

/// Reference search depth used by the enhanced pipeline.
const SEARCH_START_PAGE: u32 = 1;
const SEARCH_END_PAGE: u32 = 2;

/// Typed result of decoding the classifier's answer. The engine never lets a
/// malformed answer escape as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierVerdict {
    Decided(StrategyDecision),
    Unavailable,
}

/// Strip optional markdown code fences and parse the strict JSON decision.
pub fn decode_strategy_decision(raw: &str) -> ClassifierVerdict {
    let cleaned = raw.replace("```json", "").replace("```", "");
    match serde_json::from_str::<StrategyDecision>(cleaned.trim()) {
        Ok(decision) => ClassifierVerdict::Decided(decision),
        Err(_) => ClassifierVerdict::Unavailable,
    }
}

/// Pipeline phase. The fallback policy lives entirely in the transitions of
/// [`ImageStrategyEngine::decide_and_generate`]: classifier failure and the
/// forced-standard flags route straight to `Generating`, search problems go
/// through `FallingBack`, and both pipelines end in `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Classifying,
    Searching,
    Analyzing,
    Generating,
    FallingBack,
    Done,
}

/// Decides between the standard and the enhanced image workflow for one
/// request and runs the chosen pipeline. Holds no cross-request state; safe
/// to share across concurrent requests.
pub struct ImageStrategyEngine {
    text: Arc<dyn TextModel>,
    image: Arc<dyn ImageModel>,
    vision: Arc<dyn VisionModel>,
    search: Arc<dyn ReferenceSearch>,
    config: GenerationConfig,
}

impl ImageStrategyEngine {
    pub fn new(
        text: Arc<dyn TextModel>,
        image: Arc<dyn ImageModel>,
        vision: Arc<dyn VisionModel>,
        search: Arc<dyn ReferenceSearch>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            text,
            image,
            vision,
            search,
            config,
        }
    }

    /// Single entry point. Returns zero or more images plus the decision
    /// record; never errors. The only way the caller sees an empty list is
    /// when every generation attempt across the chosen (and any fallback)
    /// pipeline failed.
    pub async fn decide_and_generate(&self, request: &GenerationRequest) -> EngineOutcome {
        let mut state = EngineState::Classifying;
        let mut decision = StrategyDecision {
            use_enhanced: false,
            reasoning: FORCED_STANDARD_REASONING.to_string(),
        };
        let mut references: Vec<ReferenceImage> = Vec::new();
        let mut images: Vec<GeneratedImage> = Vec::new();
        let mut workflow = Workflow::Standard;

        loop {
            state = match state {
                EngineState::Classifying => {
                    if request.budget_mode || request.skip_enhanced {
                        log::info!("💰 Budget mode: skipping agent decision, using STANDARD workflow");
                        EngineState::Generating
                    } else {
                        log::info!("📊 Analyzing keyword complexity...");
                        decision = self.classify(request).await;
                        log::info!(
                            "💡 Agent decision: {}",
                            if decision.use_enhanced {
                                "ENHANCED"
                            } else {
                                "STANDARD"
                            }
                        );
                        log::info!("💡 Reason: {}", decision.reasoning);
                        if decision.use_enhanced {
                            EngineState::Searching
                        } else {
                            EngineState::Generating
                        }
                    }
                }
                EngineState::Searching => {
                    let search_request = ImageSearchRequest::new(&request.keyword)
                        .with_pages(SEARCH_START_PAGE, SEARCH_END_PAGE);
                    match self.search.search(search_request).await {
                        Ok(found) if !found.is_empty() => {
                            log::info!("🔍 Found {} reference images", found.len());
                            references = found;
                            EngineState::Analyzing
                        }
                        Ok(_) => {
                            log::warn!("No reference images found");
                            EngineState::FallingBack
                        }
                        Err(e) => {
                            log::error!("Reference search failed: {}", e);
                            EngineState::FallingBack
                        }
                    }
                }
                EngineState::Analyzing => match self.run_enhanced(request, &references).await {
                    Ok(generated) => {
                        images = generated;
                        workflow = Workflow::Enhanced;
                        EngineState::Done
                    }
                    Err(e) => {
                        log::error!("Enhanced workflow failed: {}", e);
                        EngineState::FallingBack
                    }
                },
                EngineState::FallingBack => {
                    log::info!("Falling back to standard image generation");
                    EngineState::Generating
                }
                EngineState::Generating => {
                    log::info!("⚡ Using STANDARD workflow: direct image generation");
                    images = self.run_standard(request).await;
                    workflow = Workflow::Standard;
                    EngineState::Done
                }
                EngineState::Done => break,
            };
        }

        log::info!("✅ Generated {} images", images.len());
        EngineOutcome {
            images,
            decision,
            workflow,
        }
    }

    /// Ask the lightweight classifier whether the keyword is generic or
    /// niche. Fails open to the standard workflow: a failed call or a
    /// malformed answer must never block content generation.
    async fn classify(&self, request: &GenerationRequest) -> StrategyDecision {
        let text_request = TextGenerationRequest {
            system_prompt: prompts::CLASSIFIER_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::classifier_user_prompt(&request.keyword, &request.title),
            model: None,
            temperature: Some(0.3),
        };

        match self.text.complete(text_request).await {
            Ok(response) => match decode_strategy_decision(&response.text) {
                ClassifierVerdict::Decided(decision) => decision,
                ClassifierVerdict::Unavailable => {
                    log::error!("Classifier returned an undecodable answer");
                    StrategyDecision {
                        use_enhanced: false,
                        reasoning: FALLBACK_REASONING.to_string(),
                    }
                }
            },
            Err(e) => {
                log::error!("Strategy classification failed: {}", e);
                StrategyDecision {
                    use_enhanced: false,
                    reasoning: FALLBACK_REASONING.to_string(),
                }
            }
        }
    }

    /// Direct generation over the fixed prompt ladder. Per-image failures are
    /// logged and skipped; the result may be shorter than requested.
    async fn run_standard(&self, request: &GenerationRequest) -> Vec<GeneratedImage> {
        let ladder = prompts::standard_prompt_ladder(&request.title);
        let total = (request.image_count as usize).min(ladder.len());
        let mut images = Vec::new();

        for (i, template) in ladder.into_iter().take(total).enumerate() {
            log::info!(
                "Generating image {}/{}: {:.60}...",
                i + 1,
                total,
                template.prompt
            );

            match self
                .image
                .generate(ImageGenerationRequest::new(&template.prompt))
                .await
            {
                Ok(url) => {
                    images.push(GeneratedImage {
                        url,
                        alt: template.alt,
                        prompt: template.prompt,
                    });
                    log::info!("Image {} generated successfully", i + 1);
                }
                Err(e) => {
                    log::error!("Error generating image {}: {}", i + 1, e);
                }
            }

            if i + 1 < total {
                tokio::time::sleep(self.config.standard_pacing).await;
            }
        }

        images
    }

    /// Reference-driven generation: vision analysis of each reference image,
    /// then re-generation from the composed prompt. A failure at either step
    /// drops that slot. Shortfalls are topped up with at most three generic
    /// prompts, so the result can still be short of the requested count.
    async fn run_enhanced(
        &self,
        request: &GenerationRequest,
        references: &[ReferenceImage],
    ) -> Result<Vec<GeneratedImage>> {
        let to_process = (request.image_count as usize).min(references.len());
        let mut images = Vec::new();

        for (i, reference) in references.iter().take(to_process).enumerate() {
            log::info!(
                "Generating enhanced image {}/{} based on reference",
                i + 1,
                request.image_count
            );

            match self.generate_from_reference(&request.keyword, &reference.url).await {
                Ok(image) => {
                    images.push(image);
                    log::info!("Enhanced image {} generated successfully", i + 1);
                }
                Err(e) => {
                    log::error!("Error generating enhanced image {}: {}", i + 1, e);
                }
            }

            if i + 1 < to_process {
                tokio::time::sleep(self.config.enhanced_pacing).await;
            }
        }

        let requested = request.image_count as usize;
        if images.len() < requested {
            let missing = requested - images.len();
            log::info!(
                "Filling remaining {} images with standard generation",
                missing
            );

            let topups = prompts::topup_prompts(&request.title, &request.keyword);
            let total = missing.min(topups.len());

            for (i, template) in topups.into_iter().take(total).enumerate() {
                match self
                    .image
                    .generate(ImageGenerationRequest::new(&template.prompt))
                    .await
                {
                    Ok(url) => images.push(GeneratedImage {
                        url,
                        alt: template.alt,
                        prompt: template.prompt,
                    }),
                    Err(e) => {
                        log::error!("Error generating top-up image: {}", e);
                    }
                }

                if i + 1 < total {
                    tokio::time::sleep(self.config.standard_pacing).await;
                }
            }
        }

        Ok(images)
    }

    async fn generate_from_reference(
        &self,
        keyword: &str,
        reference_url: &str,
    ) -> Result<GeneratedImage> {
        log::info!("Analyzing reference image for: {}", keyword);

        let analysis = self
            .vision
            .analyze(VisionAnalysisRequest {
                image_url: reference_url.to_string(),
                prompt: prompts::vision_analysis_prompt(self.config.remove_contact_info),
                model: None,
            })
            .await?;
        log::debug!("Vision analysis: {:.200}...", analysis);

        let prompt = prompts::enhanced_generation_prompt(
            &analysis,
            keyword,
            self.config.remove_contact_info,
        );
        let url = self
            .image
            .generate(ImageGenerationRequest::new(&prompt))
            .await?;

        Ok(GeneratedImage {
            url,
            alt: prompts::enhanced_alt(keyword),
            prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PressgenError;
    use crate::models::{TextGenerationResponse, TokenUsage};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    enum TextBehavior {
        Answer(&'static str),
        Fail,
    }

    struct FakeText {
        behavior: TextBehavior,
        calls: AtomicUsize,
    }

    impl FakeText {
        fn new(behavior: TextBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextModel for FakeText {
        async fn complete(
            &self,
            _request: TextGenerationRequest,
        ) -> crate::error::Result<TextGenerationResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                TextBehavior::Answer(text) => Ok(TextGenerationResponse {
                    text: text.to_string(),
                    model: "fake".to_string(),
                    usage: TokenUsage::default(),
                }),
                TextBehavior::Fail => Err(PressgenError::ApiError {
                    status: 500,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    struct FakeImage {
        calls: AtomicUsize,
        fail_on: Mutex<HashSet<usize>>,
    }

    impl FakeImage {
        fn new() -> Arc<Self> {
            Self::failing_on(&[])
        }

        /// `fail_on` holds 1-based call numbers that should error.
        fn failing_on(fail_on: &[usize]) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_on: Mutex::new(fail_on.iter().copied().collect()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageModel for FakeImage {
        async fn generate(&self, _request: ImageGenerationRequest) -> crate::error::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.lock().unwrap().contains(&call) {
                return Err(PressgenError::ApiError {
                    status: 429,
                    body: "rate limited".to_string(),
                });
            }
            Ok(format!("https://img.example/gen-{}.png", call))
        }
    }

    struct FakeVision {
        calls: AtomicUsize,
        fail_on: Mutex<HashSet<usize>>,
    }

    impl FakeVision {
        fn new() -> Arc<Self> {
            Self::failing_on(&[])
        }

        fn failing_on(fail_on: &[usize]) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_on: Mutex::new(fail_on.iter().copied().collect()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VisionModel for FakeVision {
        async fn analyze(&self, _request: VisionAnalysisRequest) -> crate::error::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.lock().unwrap().contains(&call) {
                return Err(PressgenError::ResponseError("no analysis".to_string()));
            }
            Ok(format!("composition and palette notes {}", call))
        }
    }

    enum SearchBehavior {
        Found(usize),
        Empty,
        Fail,
    }

    struct FakeSearch {
        behavior: SearchBehavior,
        calls: AtomicUsize,
    }

    impl FakeSearch {
        fn new(behavior: SearchBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReferenceSearch for FakeSearch {
        async fn search(
            &self,
            _request: ImageSearchRequest,
        ) -> crate::error::Result<Vec<ReferenceImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                SearchBehavior::Found(count) => Ok((0..count)
                    .map(|i| ReferenceImage {
                        url: format!("https://ref.example/{}.jpg", i),
                        title: None,
                        source: None,
                        width: None,
                        height: None,
                    })
                    .collect()),
                SearchBehavior::Empty => Ok(vec![]),
                SearchBehavior::Fail => Err(PressgenError::SearchTimeout(
                    "no results after 30 attempts".to_string(),
                )),
            }
        }
    }

    fn test_config() -> GenerationConfig {
        GenerationConfig::new().with_pacing(Duration::ZERO, Duration::ZERO)
    }

    fn engine(
        text: Arc<FakeText>,
        image: Arc<FakeImage>,
        vision: Arc<FakeVision>,
        search: Arc<FakeSearch>,
    ) -> ImageStrategyEngine {
        ImageStrategyEngine::new(text, image, vision, search, test_config())
    }

    fn request(count: u32) -> GenerationRequest {
        GenerationRequest {
            keyword: "artisan teapot".to_string(),
            title: "Handmade Teapots".to_string(),
            budget_mode: false,
            skip_enhanced: false,
            image_count: count,
        }
    }

    const ENHANCED_ANSWER: &str = r#"{"useEnhanced": true, "reasoning": "niche product"}"#;
    const STANDARD_ANSWER: &str = r#"{"useEnhanced": false, "reasoning": "generic subject"}"#;

    #[test]
    fn test_decode_strict_json() {
        let verdict = decode_strategy_decision(STANDARD_ANSWER);
        assert_eq!(
            verdict,
            ClassifierVerdict::Decided(StrategyDecision {
                use_enhanced: false,
                reasoning: "generic subject".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_fenced_json() {
        let raw = "```json\n{\"useEnhanced\": true, \"reasoning\": \"rare item\"}\n```";
        match decode_strategy_decision(raw) {
            ClassifierVerdict::Decided(decision) => assert!(decision.use_enhanced),
            ClassifierVerdict::Unavailable => panic!("fenced JSON should decode"),
        }
    }

    #[test]
    fn test_decode_garbage_is_unavailable() {
        assert_eq!(
            decode_strategy_decision("I think you should use enhanced mode."),
            ClassifierVerdict::Unavailable
        );
    }

    #[tokio::test]
    async fn test_standard_output_bounded_by_request_and_ladder() {
        for count in 1..=5u32 {
            let image = FakeImage::new();
            let eng = engine(
                FakeText::new(TextBehavior::Answer(STANDARD_ANSWER)),
                image.clone(),
                FakeVision::new(),
                FakeSearch::new(SearchBehavior::Empty),
            );
            let outcome = eng.decide_and_generate(&request(count)).await;
            assert_eq!(outcome.images.len(), count as usize);
        }

        // Requests beyond the ladder are clamped to five.
        let image = FakeImage::new();
        let eng = engine(
            FakeText::new(TextBehavior::Answer(STANDARD_ANSWER)),
            image.clone(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Empty),
        );
        let outcome = eng.decide_and_generate(&request(9)).await;
        assert_eq!(outcome.images.len(), 5);
        assert_eq!(image.calls(), 5);
    }

    #[tokio::test]
    async fn test_budget_mode_never_invokes_classifier() {
        let text = FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER));
        let search = FakeSearch::new(SearchBehavior::Found(5));
        let eng = engine(text.clone(), FakeImage::new(), FakeVision::new(), search.clone());

        let outcome = eng
            .decide_and_generate(&request(2).with_budget_mode(true))
            .await;

        assert_eq!(text.calls(), 0);
        assert_eq!(search.calls(), 0);
        assert!(!outcome.decision.use_enhanced);
        assert_eq!(outcome.workflow, Workflow::Standard);
        assert_eq!(outcome.images.len(), 2);
    }

    #[tokio::test]
    async fn test_skip_enhanced_never_invokes_classifier() {
        let text = FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER));
        let eng = engine(
            text.clone(),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Found(5)),
        );

        let outcome = eng
            .decide_and_generate(&request(1).with_skip_enhanced(true))
            .await;

        assert_eq!(text.calls(), 0);
        assert_eq!(outcome.workflow, Workflow::Standard);
    }

    #[tokio::test]
    async fn test_classifier_failure_fails_open_to_standard() {
        let eng = engine(
            FakeText::new(TextBehavior::Fail),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Found(5)),
        );

        let outcome = eng.decide_and_generate(&request(3)).await;

        assert_eq!(
            outcome.decision,
            StrategyDecision {
                use_enhanced: false,
                reasoning: FALLBACK_REASONING.to_string(),
            }
        );
        assert_eq!(outcome.workflow, Workflow::Standard);
        assert_eq!(outcome.images.len(), 3);
    }

    #[tokio::test]
    async fn test_undecodable_classifier_answer_fails_open() {
        let eng = engine(
            FakeText::new(TextBehavior::Answer("definitely use enhanced")),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Found(5)),
        );

        let outcome = eng.decide_and_generate(&request(1)).await;
        assert_eq!(outcome.decision.reasoning, FALLBACK_REASONING);
        assert_eq!(outcome.workflow, Workflow::Standard);
    }

    #[tokio::test]
    async fn test_partial_standard_failures_are_skipped() {
        let image = FakeImage::failing_on(&[2, 4]);
        let eng = engine(
            FakeText::new(TextBehavior::Answer(STANDARD_ANSWER)),
            image.clone(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Empty),
        );

        let outcome = eng.decide_and_generate(&request(5)).await;

        // All five attempts ran; two failed slots were dropped.
        assert_eq!(image.calls(), 5);
        assert_eq!(outcome.images.len(), 3);
        assert_eq!(outcome.images[0].alt, "Featured image for Handmade Teapots");
        assert_eq!(
            outcome.images[1].alt,
            "Key concepts illustration for Handmade Teapots"
        );
    }

    #[tokio::test]
    async fn test_total_failure_returns_empty_list() {
        let image = FakeImage::failing_on(&[1, 2, 3, 4, 5]);
        let eng = engine(
            FakeText::new(TextBehavior::Answer(STANDARD_ANSWER)),
            image,
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Empty),
        );

        let outcome = eng.decide_and_generate(&request(5)).await;
        assert!(outcome.images.is_empty());
    }

    #[tokio::test]
    async fn test_enhanced_happy_path() {
        let vision = FakeVision::new();
        let search = FakeSearch::new(SearchBehavior::Found(5));
        let eng = engine(
            FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER)),
            FakeImage::new(),
            vision.clone(),
            search.clone(),
        );

        let outcome = eng.decide_and_generate(&request(3)).await;

        assert_eq!(search.calls(), 1);
        assert_eq!(vision.calls(), 3);
        assert_eq!(outcome.workflow, Workflow::Enhanced);
        assert_eq!(outcome.images.len(), 3);
        for image in &outcome.images {
            assert_eq!(
                image.alt,
                "Professional image for artisan teapot (AI-generated, reference-inspired)"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_search_matches_standard_byte_for_byte() {
        let enhanced_eng = engine(
            FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER)),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Empty),
        );
        let standard_eng = engine(
            FakeText::new(TextBehavior::Answer(STANDARD_ANSWER)),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Empty),
        );

        let fell_back = enhanced_eng.decide_and_generate(&request(3)).await;
        let standard = standard_eng.decide_and_generate(&request(3)).await;

        assert_eq!(fell_back.workflow, Workflow::Standard);
        assert_eq!(fell_back.images, standard.images);
        assert_eq!(
            fell_back.images[0].alt,
            "Featured image for Handmade Teapots"
        );
        assert_eq!(
            fell_back.images[1].alt,
            "Detailed view related to Handmade Teapots"
        );
        assert_eq!(
            fell_back.images[2].alt,
            "Key concepts illustration for Handmade Teapots"
        );
    }

    #[tokio::test]
    async fn test_search_failure_falls_back_to_standard() {
        let eng = engine(
            FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER)),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Fail),
        );

        let outcome = eng.decide_and_generate(&request(2)).await;
        assert_eq!(outcome.workflow, Workflow::Standard);
        assert_eq!(outcome.images.len(), 2);
        // The decision record still reflects the classifier's advice.
        assert!(outcome.decision.use_enhanced);
    }

    #[tokio::test]
    async fn test_enhanced_tops_up_from_generic_prompts() {
        // Two references for five requested images: 2 enhanced + 3 top-ups.
        let search = FakeSearch::new(SearchBehavior::Found(2));
        let vision = FakeVision::new();
        let eng = engine(
            FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER)),
            FakeImage::new(),
            vision.clone(),
            search,
        );

        let outcome = eng.decide_and_generate(&request(5)).await;

        assert_eq!(vision.calls(), 2);
        assert_eq!(outcome.images.len(), 5);
        assert_eq!(
            outcome.images[4].alt,
            "Professional image for Handmade Teapots"
        );
    }

    #[tokio::test]
    async fn test_enhanced_topup_is_silently_short() {
        // One reference for five requested images: the top-up set caps at
        // three, so only four come back.
        let eng = engine(
            FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER)),
            FakeImage::new(),
            FakeVision::new(),
            FakeSearch::new(SearchBehavior::Found(1)),
        );

        let outcome = eng.decide_and_generate(&request(5)).await;
        assert_eq!(outcome.workflow, Workflow::Enhanced);
        assert_eq!(outcome.images.len(), 4);
    }

    #[tokio::test]
    async fn test_vision_failure_drops_slot_and_continues() {
        let vision = FakeVision::failing_on(&[2]);
        let eng = engine(
            FakeText::new(TextBehavior::Answer(ENHANCED_ANSWER)),
            FakeImage::new(),
            vision.clone(),
            FakeSearch::new(SearchBehavior::Found(3)),
        );

        let outcome = eng.decide_and_generate(&request(3)).await;

        // Reference 2 was dropped, the loop went on, and the shortfall was
        // topped up with one generic prompt.
        assert_eq!(vision.calls(), 3);
        assert_eq!(outcome.images.len(), 3);
        assert_eq!(
            outcome.images[2].alt,
            "Professional image for Handmade Teapots"
        );
    }
}
