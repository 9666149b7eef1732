use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Draft,
    Pending,
    Private,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordPressPost {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub tags: Vec<u64>,
    pub categories: Vec<u64>,
    pub featured_media: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderedField {
    pub rendered: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordPressPostResponse {
    pub id: u64,
    pub link: String,
    pub status: String,
    pub title: RenderedField,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordPressMediaResponse {
    pub id: u64,
    pub source_url: String,
    #[serde(default)]
    pub media_details: MediaDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordPressTerm {
    pub id: u64,
    pub name: String,
}

/// Result of publishing one article.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub post_id: u64,
    pub link: String,
    pub uploaded_images: usize,
    pub featured_media_id: Option<u64>,
}
