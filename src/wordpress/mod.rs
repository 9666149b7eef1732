use crate::{
    config::WordPressConfig,
    error::{PressgenError, Result},
    models::{
        GeneratedContent, GeneratedImage, PostStatus, PublishOutcome, WordPressMediaResponse,
        WordPressPost, WordPressPostResponse, WordPressTerm,
    },
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart;
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

/// WordPress falls back to the built-in "Uncategorized" term when a post
/// carries no category.
const UNCATEGORIZED_ID: u64 = 1;

/// REST client for one WordPress site, authenticated with an application
/// password. Also hosts the publishing orchestration: media upload, body
/// interleaving, term resolution, post creation.
pub struct WordPressClient {
    http: Client,
    base_url: String,
    auth_header: String,
}

impl WordPressClient {
    pub fn new(config: WordPressConfig) -> Result<Self> {
        let url = config
            .url
            .ok_or_else(|| PressgenError::ConfigError("WordPress URL is required".into()))?;
        let username = config
            .username
            .ok_or_else(|| PressgenError::ConfigError("WordPress username is required".into()))?;
        let app_password = config.app_password.ok_or_else(|| {
            PressgenError::ConfigError("WordPress application password is required".into())
        })?;

        let token = BASE64.encode(format!("{}:{}", username, app_password));

        Ok(Self {
            http: Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", token),
        })
    }

    pub async fn create_post(&self, post: &WordPressPost) -> Result<WordPressPostResponse> {
        let response = self
            .http
            .post(&format!("{}/wp-json/wp/v2/posts", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .json(post)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Post creation failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse post response: {}", e))
        })
    }

    pub async fn update_post(&self, post_id: u64, fields: &Value) -> Result<WordPressPostResponse> {
        let response = self
            .http
            .post(&format!("{}/wp-json/wp/v2/posts/{}", self.base_url, post_id))
            .header(AUTHORIZATION, &self.auth_header)
            .json(fields)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Post update failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse post response: {}", e))
        })
    }

    /// Download the image behind `image_url` and re-upload it to the
    /// WordPress media library.
    pub async fn upload_media(
        &self,
        image_url: &str,
        filename: Option<String>,
    ) -> Result<WordPressMediaResponse> {
        let image_response = self
            .http
            .get(image_url)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Image fetch failed: {}", e)))?;

        if !image_response.status().is_success() {
            return Err(PressgenError::PublishError(format!(
                "Failed to fetch image: {}",
                image_response.status()
            )));
        }

        let bytes = image_response
            .bytes()
            .await
            .map_err(|e| PressgenError::ResponseError(format!("Image read failed: {}", e)))?;

        let name = filename.unwrap_or_else(|| format!("image-{}.jpg", Uuid::new_v4()));
        let part = multipart::Part::bytes(bytes.to_vec())
            .file_name(name)
            .mime_str("image/jpeg")
            .map_err(|e| PressgenError::RequestError(format!("Invalid media part: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&format!("{}/wp-json/wp/v2/media", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Media upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse media response: {}", e))
        })
    }

    pub async fn get_or_create_tag(&self, name: &str) -> Result<u64> {
        self.get_or_create_term("tags", name).await
    }

    pub async fn get_or_create_category(&self, name: &str) -> Result<u64> {
        self.get_or_create_term("categories", name).await
    }

    async fn get_or_create_term(&self, taxonomy: &str, name: &str) -> Result<u64> {
        let search_response = self
            .http
            .get(&format!("{}/wp-json/wp/v2/{}", self.base_url, taxonomy))
            .query(&[("search", name)])
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Term search failed: {}", e)))?;

        if search_response.status().is_success() {
            let existing: Vec<WordPressTerm> = search_response.json().await.map_err(|e| {
                PressgenError::ResponseError(format!("Failed to parse term search: {}", e))
            })?;
            if let Some(term) = existing.first() {
                return Ok(term.id);
            }
        }

        let create_response = self
            .http
            .post(&format!("{}/wp-json/wp/v2/{}", self.base_url, taxonomy))
            .header(AUTHORIZATION, &self.auth_header)
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(|e| PressgenError::RequestError(format!("Term creation failed: {}", e)))?;

        let status = create_response.status();
        if !status.is_success() {
            let body = create_response.text().await.unwrap_or_default();
            return Err(PressgenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let term: WordPressTerm = create_response.json().await.map_err(|e| {
            PressgenError::ResponseError(format!("Failed to parse created term: {}", e))
        })?;
        Ok(term.id)
    }

    /// Cheap authenticated probe. Never errors.
    pub async fn test_connection(&self) -> bool {
        let response = self
            .http
            .get(&format!("{}/wp-json/wp/v2/users/me", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await;

        match response {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                log::error!("WordPress connection test failed: {}", e);
                false
            }
        }
    }

    /// Publish one generated article: resolve terms, upload the images,
    /// interleave them into the body, create the post. Per-image and per-term
    /// failures are logged and skipped; only post creation itself is fatal.
    pub async fn publish_article(
        &self,
        content: &GeneratedContent,
        images: &[GeneratedImage],
        status: PostStatus,
    ) -> Result<PublishOutcome> {
        let mut tag_ids = Vec::new();
        for tag in &content.tags {
            if tag.is_empty() {
                continue;
            }
            match self.get_or_create_tag(tag).await {
                Ok(id) => tag_ids.push(id),
                Err(e) => log::error!("Error creating tag \"{}\": {}", tag, e),
            }
        }

        let mut category_ids = Vec::new();
        for category in &content.categories {
            if category.is_empty() {
                continue;
            }
            match self.get_or_create_category(category).await {
                Ok(id) => category_ids.push(id),
                Err(e) => log::error!("Error creating category \"{}\": {}", category, e),
            }
        }
        if category_ids.is_empty() {
            category_ids.push(UNCATEGORIZED_ID);
        }

        let slug = filename_slug(&content.title);
        let mut featured_media_id = None;
        let mut figures = Vec::new();

        if let Some(first) = images.first() {
            match self
                .upload_media(&first.url, Some(format!("featured-{}.jpg", slug)))
                .await
            {
                Ok(media) => {
                    log::info!(
                        "Featured image uploaded to WordPress, ID: {}, URL: {}",
                        media.id,
                        media.source_url
                    );
                    featured_media_id = Some(media.id);
                }
                Err(e) => log::error!("Error uploading featured image: {}", e),
            }
        }

        for (i, image) in images.iter().enumerate() {
            match self
                .upload_media(&image.url, Some(format!("image-{}-{}.jpg", i + 1, slug)))
                .await
            {
                Ok(media) => {
                    log::info!(
                        "Image {} uploaded to WordPress, ID: {}, URL: {}",
                        i + 1,
                        media.id,
                        media.source_url
                    );
                    figures.push(figure_html(&media, &image.alt));
                }
                Err(e) => log::error!("Error uploading image {}: {}", i + 1, e),
            }
        }

        let body = interleave_images(&content.body, &figures);

        log::info!(
            "Publishing to WordPress: \"{}\" ({} tags, {} categories)",
            content.title,
            tag_ids.len(),
            category_ids.len()
        );

        let post = WordPressPost {
            title: content.title.clone(),
            content: body,
            status,
            excerpt: content.meta_description.clone().unwrap_or_default(),
            tags: tag_ids,
            categories: category_ids,
            featured_media: featured_media_id.unwrap_or(0),
        };

        let created = self.create_post(&post).await?;
        log::info!("WordPress post created successfully: {}", created.id);

        Ok(PublishOutcome {
            post_id: created.id,
            link: created.link,
            uploaded_images: figures.len(),
            featured_media_id,
        })
    }
}

/// Gutenberg image block with the alt text doubling as SEO caption.
pub fn figure_html(media: &WordPressMediaResponse, alt: &str) -> String {
    format!(
        "\n<figure class=\"wp-block-image size-large\">\n  <img src=\"{}\" alt=\"{}\" class=\"wp-image-{}\" style=\"max-width: 1280px; height: auto;\" width=\"{}\" height=\"{}\" />\n  <figcaption>{}</figcaption>\n</figure>\n",
        media.source_url, alt, media.id, media.media_details.width, media.media_details.height, alt
    )
}

/// Spread the uploaded figures through the article at even paragraph
/// intervals. All original text is preserved; surplus figures beyond one per
/// paragraph are dropped.
pub fn interleave_images(body: &str, figures: &[String]) -> String {
    if figures.is_empty() {
        return body.to_string();
    }

    let mut paragraphs: Vec<String> = body.split("</p>").map(String::from).collect();
    let interval = (paragraphs.len() / figures.len()).max(1);

    let mut figure_index = 0;
    let mut i = interval - 1;
    while i < paragraphs.len() && figure_index < figures.len() {
        paragraphs[i].push_str("</p>");
        paragraphs[i].push_str(&figures[figure_index]);
        figure_index += 1;
        i += interval;
    }

    paragraphs.join("</p>")
}

fn filename_slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
