use serde::Deserialize;
use serde_json::Value;

use super::non_empty;
use crate::models::blogmodel::*;

/// Turns the `tags` field into the stored comma-joined string. Arrays are
/// trimmed and blank entries dropped; a string is only trimmed.
pub fn normalize_tags(tags: &Value) -> String {
    match tags {
        Value::Array(items) => items
            .iter()
            .map(|tag| match tag {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(","),
        Value::String(s) => s.trim().to_string(),
        _ => String::new(),
    }
}

const REQUIRED_FIELDS: &str = "Title, excerpt, content, and category are required";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogDto {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Value>,
    pub image_url: Option<String>,
    pub author_name: Option<String>,
}

impl CreateBlogDto {
    pub fn into_new_blog(self) -> Result<NewBlog, String> {
        let content = self.content.filter(|c| !c.trim().is_empty());
        let (Some(title), Some(excerpt), Some(content), Some(category)) = (
            non_empty(self.title),
            non_empty(self.excerpt),
            content,
            non_empty(self.category),
        ) else {
            return Err(REQUIRED_FIELDS.to_string());
        };

        Ok(NewBlog {
            title,
            excerpt,
            content,
            category: category.to_lowercase(),
            tags: self.tags.as_ref().map(normalize_tags).unwrap_or_default(),
            author_name: non_empty(self.author_name),
            image_url: self.image_url.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogDto {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Value>,
    pub image_url: Option<String>,
}

impl UpdateBlogDto {
    pub fn into_update(self) -> Result<BlogUpdate, String> {
        let content = self.content.filter(|c| !c.trim().is_empty());
        let (Some(title), Some(excerpt), Some(content), Some(category)) = (
            non_empty(self.title),
            non_empty(self.excerpt),
            content,
            non_empty(self.category),
        ) else {
            return Err(REQUIRED_FIELDS.to_string());
        };

        Ok(BlogUpdate {
            title,
            excerpt,
            content,
            category: category.to_lowercase(),
            tags: self.tags.as_ref().map(normalize_tags),
            image_url: self.image_url,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct BlogQueryDto {
    pub category: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl BlogQueryDto {
    pub fn to_filter(&self) -> BlogFilter {
        BlogFilter {
            category: non_empty(self.category.clone()),
            title: non_empty(self.title.clone()),
            tags: self
                .tags
                .as_deref()
                .map(|tags| {
                    tags.split(',')
                        .map(|tag| tag.trim().to_string())
                        .filter(|tag| !tag.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
