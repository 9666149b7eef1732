pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grok;
pub mod logger;
pub mod models;
pub mod search;
pub mod wordpress;

pub use config::{
    Config, GenerationConfig, GenerationMode, GrokConfig, SearchConfig, WordPressConfig,
};
pub use engine::{
    ImageModel, ImageStrategyEngine, ReferenceSearch, TextModel, VisionModel,
};
pub use error::{PressgenError, Result};
pub use generator::ContentGenerator;
pub use grok::{GrokClient, ImageClient, TextClient, VisionClient};
pub use models::*;
pub use search::ImageSearchClient;
pub use wordpress::WordPressClient;
