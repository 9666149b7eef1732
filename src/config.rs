use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.x.ai";
pub const DEFAULT_TEXT_MODEL: &str = "grok-4-0709";
pub const DEFAULT_CHEAPER_TEXT_MODEL: &str = "grok-3-mini";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "grok-beta";
pub const DEFAULT_IMAGE_MODEL: &str = "grok-2-vision-beta";
pub const DEFAULT_VISION_MODEL: &str = "grok-2-vision-beta";

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.brightdata.com";
pub const DEFAULT_SEARCH_DATASET_ID: &str = "gd_mfz5x93lmsjjjylob";

#[derive(Debug, Clone)]
pub struct GrokConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub vision_model: Option<String>,
    pub classifier_model: Option<String>,
}

impl Default for GrokConfig {
    fn default() -> Self {
        GrokConfig {
            api_key: None,
            base_url: None,
            text_model: None,
            image_model: None,
            vision_model: None,
            classifier_model: None,
        }
    }
}

impl GrokConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("XAI_API_KEY").ok();
        let base_url = env::var("XAI_BASE_URL").ok();

        GrokConfig {
            api_key,
            base_url,
            text_model: None,
            image_model: None,
            vision_model: None,
            classifier_model: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = Some(model.into());
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub dataset_id: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            api_key: None,
            base_url: None,
            dataset_id: None,
            language: None,
            country: None,
            poll_interval: Duration::from_secs(2),
            max_poll_attempts: 30,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("BRIGHT_DATA_API_KEY").ok();

        SearchConfig {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_locale(
        mut self,
        language: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.language = Some(language.into());
        self.country = Some(country.into());
        self
    }

    pub fn with_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.max_poll_attempts = max_attempts;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WordPressConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub app_password: Option<String>,
}

impl Default for WordPressConfig {
    fn default() -> Self {
        WordPressConfig {
            url: None,
            username: None,
            app_password: None,
        }
    }
}

impl WordPressConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let url = env::var("WORDPRESS_URL").ok();
        let username = env::var("WORDPRESS_USERNAME").ok();
        let app_password = env::var("WORDPRESS_APP_PASSWORD").ok();

        WordPressConfig {
            url,
            username,
            app_password,
        }
    }

    pub fn with_site(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.app_password = Some(app_password.into());
        self
    }
}

/// Resolved generation settings. Precedence: explicit request fields >
/// this struct > hardcoded defaults.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub budget_mode: bool,
    pub use_cheaper_model: bool,
    pub skip_enhanced: bool,
    pub image_count: u32,
    pub content_length: u32,
    pub remove_contact_info: bool,
    pub standard_pacing: Duration,
    pub enhanced_pacing: Duration,
    pub mode: Option<GenerationMode>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            budget_mode: false,
            use_cheaper_model: false,
            skip_enhanced: false,
            image_count: 5,
            content_length: 1000,
            remove_contact_info: true,
            standard_pacing: Duration::from_secs(1),
            enhanced_pacing: Duration::from_secs(2),
            mode: None,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let budget_mode = env::var("BUDGET_MODE").ok().map_or(false, |v| v == "true");
        let use_cheaper_model = env::var("USE_CHEAPER_MODEL")
            .ok()
            .map_or(false, |v| v == "true");
        let skip_enhanced = env::var("SKIP_ENHANCED_IMAGES")
            .ok()
            .map_or(false, |v| v == "true");
        let image_count = env::var("IMAGE_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        GenerationConfig {
            budget_mode,
            use_cheaper_model,
            skip_enhanced,
            image_count,
            content_length: if budget_mode { 800 } else { 1000 },
            ..Default::default()
        }
    }

    pub fn for_mode(mode: GenerationMode) -> Self {
        match mode {
            GenerationMode::BestQuality => GenerationConfig {
                budget_mode: false,
                use_cheaper_model: false,
                skip_enhanced: false,
                image_count: 5,
                content_length: 1000,
                mode: Some(mode),
                ..Default::default()
            },
            GenerationMode::Normal => GenerationConfig {
                budget_mode: false,
                use_cheaper_model: false,
                skip_enhanced: true,
                image_count: 1,
                content_length: 1000,
                mode: Some(mode),
                ..Default::default()
            },
            GenerationMode::MostSaving => GenerationConfig {
                budget_mode: true,
                use_cheaper_model: true,
                skip_enhanced: true,
                image_count: 1,
                content_length: 800,
                mode: Some(mode),
                ..Default::default()
            },
        }
    }

    /// Workflow label recorded in token stats.
    pub fn workflow_label(&self) -> &'static str {
        match self.mode {
            Some(GenerationMode::BestQuality) => "premium",
            Some(GenerationMode::MostSaving) => "budget",
            Some(GenerationMode::Normal) => "standard",
            None => {
                if self.budget_mode {
                    "budget"
                } else if self.skip_enhanced {
                    "standard"
                } else {
                    "smart"
                }
            }
        }
    }

    /// The text model this configuration resolves to when a request does not
    /// name one explicitly.
    pub fn text_model_label(&self) -> &'static str {
        if self.use_cheaper_model {
            DEFAULT_CHEAPER_TEXT_MODEL
        } else {
            DEFAULT_TEXT_MODEL
        }
    }

    pub fn with_budget_mode(mut self, enabled: bool) -> Self {
        self.budget_mode = enabled;
        self
    }

    pub fn with_image_count(mut self, count: u32) -> Self {
        self.image_count = count;
        self
    }

    pub fn with_pacing(mut self, standard: Duration, enhanced: Duration) -> Self {
        self.standard_pacing = standard;
        self.enhanced_pacing = enhanced;
        self
    }
}

/// Preset generation modes exposed by the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    BestQuality,
    Normal,
    MostSaving,
}

impl GenerationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "best-quality" => Some(GenerationMode::BestQuality),
            "normal" => Some(GenerationMode::Normal),
            "most-saving" => Some(GenerationMode::MostSaving),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub grok: Option<GrokConfig>,
    pub search: Option<SearchConfig>,
    pub wordpress: Option<WordPressConfig>,
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grok: None,
            search: None,
            wordpress: None,
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            grok: Some(GrokConfig::from_env()),
            search: Some(SearchConfig::from_env()),
            wordpress: Some(WordPressConfig::from_env()),
            generation: GenerationConfig::from_env(),
        }
    }

    pub fn with_grok(mut self, config: GrokConfig) -> Self {
        self.grok = Some(config);
        self
    }

    pub fn with_search(mut self, config: SearchConfig) -> Self {
        self.search = Some(config);
        self
    }

    pub fn with_wordpress(mut self, config: WordPressConfig) -> Self {
        self.wordpress = Some(config);
        self
    }

    pub fn with_generation(mut self, config: GenerationConfig) -> Self {
        self.generation = config;
        self
    }
}
