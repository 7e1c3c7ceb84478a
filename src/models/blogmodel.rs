use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: String,
    pub author_name: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: String,
    pub author_name: Option<String>,
    pub image_url: String,
}

/// Title, excerpt, content and category are always replaced; tags and image
/// only when the request carried them.
#[derive(Debug, Clone)]
pub struct BlogUpdate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct BlogFilter {
    pub category: Option<String>,
    pub title: Option<String>,
    pub tags: Vec<String>,
}
