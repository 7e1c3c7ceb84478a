use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::{contains_pattern, DBClient};
use crate::models::blogmodel::*;

const BLOG_COLUMNS: &str = r#"
    id, title, excerpt, content, category, tags, author_name, image_url,
    created_at, updated_at
"#;

// $3 is an array of tag patterns; a blog matches when any of them hits.
const BLOG_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR category ILIKE $1)
      AND ($2::text IS NULL OR title ILIKE $2)
      AND (cardinality($3::text[]) = 0 OR tags ILIKE ANY($3))
"#;

#[async_trait]
pub trait BlogExt {
    async fn save_blog(&self, blog: NewBlog) -> Result<Blog, Error>;

    async fn get_blog(&self, blog_id: Uuid) -> Result<Option<Blog>, Error>;

    async fn get_blogs(
        &self,
        filter: &BlogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Blog>, Error>;

    async fn get_blog_count(&self, filter: &BlogFilter) -> Result<i64, Error>;

    async fn update_blog(&self, blog_id: Uuid, update: BlogUpdate) -> Result<Option<Blog>, Error>;

    async fn delete_blog(&self, blog_id: Uuid) -> Result<Option<Blog>, Error>;
}

fn tag_patterns(filter: &BlogFilter) -> Vec<String> {
    filter.tags.iter().map(|tag| contains_pattern(tag)).collect()
}

#[async_trait]
impl BlogExt for DBClient {
    async fn save_blog(&self, blog: NewBlog) -> Result<Blog, Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            INSERT INTO blogs (title, excerpt, content, category, tags, author_name, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(blog.title)
        .bind(blog.excerpt)
        .bind(blog.content)
        .bind(blog.category)
        .bind(blog.tags)
        .bind(blog.author_name)
        .bind(blog.image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_blog(&self, blog_id: Uuid) -> Result<Option<Blog>, Error> {
        sqlx::query_as::<_, Blog>(&format!("SELECT {} FROM blogs WHERE id = $1", BLOG_COLUMNS))
            .bind(blog_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_blogs(
        &self,
        filter: &BlogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Blog>, Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            SELECT {}
            FROM blogs
            {}
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            BLOG_COLUMNS, BLOG_FILTER
        ))
        .bind(filter.category.as_deref().map(contains_pattern))
        .bind(filter.title.as_deref().map(contains_pattern))
        .bind(tag_patterns(filter))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_blog_count(&self, filter: &BlogFilter) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM blogs {}", BLOG_FILTER))
            .bind(filter.category.as_deref().map(contains_pattern))
            .bind(filter.title.as_deref().map(contains_pattern))
            .bind(tag_patterns(filter))
            .fetch_one(&self.pool)
            .await
    }

    async fn update_blog(&self, blog_id: Uuid, update: BlogUpdate) -> Result<Option<Blog>, Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs
            SET title = $2,
                excerpt = $3,
                content = $4,
                category = $5,
                tags = COALESCE($6, tags),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(blog_id)
        .bind(update.title)
        .bind(update.excerpt)
        .bind(update.content)
        .bind(update.category)
        .bind(update.tags)
        .bind(update.image_url)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_blog(&self, blog_id: Uuid) -> Result<Option<Blog>, Error> {
        sqlx::query_as::<_, Blog>(&format!(
            "DELETE FROM blogs WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        ))
        .bind(blog_id)
        .fetch_optional(&self.pool)
        .await
    }
}
