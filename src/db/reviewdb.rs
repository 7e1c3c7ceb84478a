use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::{contains_pattern, DBClient};
use crate::models::reviewmodel::*;

const REVIEW_COLUMNS: &str = r#"
    id, username, description, ticket_title, rating_number, ticket_id,
    created_at, updated_at
"#;

const REVIEW_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR username ILIKE $1)
      AND ($2::text IS NULL OR ticket_title ILIKE $2)
      AND ($3::int IS NULL OR rating_number = $3)
"#;

#[async_trait]
pub trait ReviewExt {
    async fn save_review(&self, review: NewReview) -> Result<Review, Error>;

    async fn get_review(&self, review_id: Uuid) -> Result<Option<Review>, Error>;

    async fn get_reviews(
        &self,
        filter: &ReviewFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, Error>;

    async fn get_review_count(&self, filter: &ReviewFilter) -> Result<i64, Error>;

    async fn get_ticket_reviews(&self, ticket_id: &str) -> Result<Vec<Review>, Error>;

    async fn update_review(
        &self,
        review_id: Uuid,
        update: ReviewUpdate,
    ) -> Result<Option<Review>, Error>;

    async fn delete_review(&self, review_id: Uuid) -> Result<Option<Review>, Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn save_review(&self, review: NewReview) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (username, description, ticket_title, rating_number, ticket_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(review.username)
        .bind(review.description)
        .bind(review.ticket_title)
        .bind(review.rating_number)
        .bind(review.ticket_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_review(&self, review_id: Uuid) -> Result<Option<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews WHERE id = $1",
            REVIEW_COLUMNS
        ))
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_reviews(
        &self,
        filter: &ReviewFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {}
            FROM reviews
            {}
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            REVIEW_COLUMNS, REVIEW_FILTER
        ))
        .bind(filter.username.as_deref().map(contains_pattern))
        .bind(filter.ticket_title.as_deref().map(contains_pattern))
        .bind(filter.rating_number)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_review_count(&self, filter: &ReviewFilter) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM reviews {}", REVIEW_FILTER))
            .bind(filter.username.as_deref().map(contains_pattern))
            .bind(filter.ticket_title.as_deref().map(contains_pattern))
            .bind(filter.rating_number)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_ticket_reviews(&self, ticket_id: &str) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews WHERE ticket_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_review(
        &self,
        review_id: Uuid,
        update: ReviewUpdate,
    ) -> Result<Option<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            UPDATE reviews
            SET username = $2,
                description = $3,
                ticket_title = $4,
                rating_number = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(review_id)
        .bind(update.username)
        .bind(update.description)
        .bind(update.ticket_title)
        .bind(update.rating_number)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<Option<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "DELETE FROM reviews WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }
}
