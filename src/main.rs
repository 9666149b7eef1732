use pressgen::engine::ImageStrategyEngine;
use pressgen::{
    Config, ContentGenerator, GrokClient, ImageSearchClient, PostStatus, WordPressClient,
};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    pressgen::logger::init_with_config(
        pressgen::logger::LoggerConfig::development()
            .with_level(pressgen::logger::LogLevel::Debug),
    )?;

    pressgen::logger::log_startup_info("pressgen", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    pressgen::logger::log_config_info(&config);

    log::info!("🔄 Creating model API client...");
    let grok = match GrokClient::new(config.grok.clone().unwrap_or_default()) {
        Ok(client) => {
            log::info!("✅ Model API client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize model API client: {}", e);
            return Err(e.into());
        }
    };

    if grok.test_connection().await {
        log::info!("✅ Model API reachable");
    } else {
        log::warn!("⚠️  Model API connection test failed, generation will likely error");
    }

    log::info!("🔄 Creating reference image search client...");
    let search = match ImageSearchClient::new(config.search.clone().unwrap_or_default()) {
        Ok(client) => {
            log::info!("✅ Search client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize search client: {}", e);
            return Err(e.into());
        }
    };

    let engine = ImageStrategyEngine::new(
        Arc::new(grok.classifier().clone()),
        Arc::new(grok.image().clone()),
        Arc::new(grok.vision().clone()),
        Arc::new(search),
        config.generation.clone(),
    );
    let generator = ContentGenerator::new(
        Arc::new(grok.text().clone()),
        engine,
        config.generation.clone(),
    );

    let keywords = env::args()
        .nth(1)
        .unwrap_or_else(|| "sustainable urban gardening".to_string());

    log::info!("🧪 Generating article for: {}", keywords);

    let article = match generator.generate_article(&keywords).await {
        Ok(article) => {
            log::info!("✅ Article generated successfully!");
            log::info!("📰 Title: {}", article.content.title);
            log::info!("📏 Body length: {} characters", article.content.body.len());
            log::info!("🖼️  Images: {}", article.images.len());
            for (i, image) in article.images.iter().enumerate() {
                log::info!("   {}. {} ({})", i + 1, image.alt, image.url);
            }
            log::info!(
                "📊 Tokens: {} prompt / {} completion / {} total",
                article.token_stats.content.prompt_tokens,
                article.token_stats.content.completion_tokens,
                article.token_stats.content.total_tokens
            );
            log::info!("🔀 Workflow: {}", article.token_stats.workflow);
            article
        }
        Err(e) => {
            log::error!("❌ Article generation failed: {}", e);
            return Err(e.into());
        }
    };

    // Publish as a draft when WordPress credentials are configured.
    let wordpress_config = config.wordpress.clone().unwrap_or_default();
    if wordpress_config.url.is_some() {
        log::info!("🔄 Publishing draft to WordPress...");

        let wordpress = match WordPressClient::new(wordpress_config) {
            Ok(client) => client,
            Err(e) => {
                log::error!("❌ Failed to initialize WordPress client: {}", e);
                return Err(e.into());
            }
        };

        if !wordpress.test_connection().await {
            log::warn!("⚠️  WordPress connection test failed");
        }

        match wordpress
            .publish_article(&article.content, &article.images, PostStatus::Draft)
            .await
        {
            Ok(outcome) => {
                log::info!("✅ Draft published: {}", outcome.link);
                log::info!("🖼️  Uploaded {} images", outcome.uploaded_images);
            }
            Err(e) => {
                log::error!("❌ Publishing failed: {}", e);
            }
        }
    } else {
        log::info!("💡 WordPress credentials not configured, skipping publish step");
    }

    log::info!("🎉 Done!");
    Ok(())
}
