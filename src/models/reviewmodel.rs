use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub username: String,
    pub description: String,
    pub ticket_title: String,
    pub rating_number: i32,
    pub ticket_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub username: String,
    pub description: String,
    pub ticket_title: String,
    pub rating_number: i32,
    pub ticket_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub username: String,
    pub description: String,
    pub ticket_title: String,
    pub rating_number: i32,
}

#[derive(Debug, Default, Clone)]
pub struct ReviewFilter {
    pub username: Option<String>,
    pub ticket_title: Option<String>,
    pub rating_number: Option<i32>,
}
