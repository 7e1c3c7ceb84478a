use serde::Deserialize;
use serde_json::Value;

use super::non_empty;
use crate::models::reviewmodel::*;

const REQUIRED_FIELDS: &str = "Username, description, ticketTitle, and ratingNumber are required";

/// Ratings are whole numbers from 1 to 5.
pub fn parse_rating(rating: f64) -> Result<i32, String> {
    if !(1.0..=5.0).contains(&rating) {
        return Err("Rating number must be between 1 and 5".to_string());
    }
    if rating.fract() != 0.0 {
        return Err("Rating number must be a whole number".to_string());
    }
    Ok(rating as i32)
}

/// Reads a rating sent either as a JSON number or a numeric string.
pub fn rating_value(value: &Value) -> Result<i32, String> {
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .unwrap_or(f64::NAN);

    parse_rating(rating)
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    pub username: Option<String>,
    pub description: Option<String>,
    pub ticket_title: Option<String>,
    pub rating_number: Option<Value>,
    pub ticket_id: Option<String>,
}

impl CreateReviewDto {
    pub fn into_new_review(self) -> Result<NewReview, String> {
        let (Some(username), Some(description), Some(ticket_title), Some(rating)) = (
            non_empty(self.username),
            non_empty(self.description),
            non_empty(self.ticket_title),
            self.rating_number,
        ) else {
            return Err(REQUIRED_FIELDS.to_string());
        };

        Ok(NewReview {
            username,
            description,
            ticket_title,
            rating_number: rating_value(&rating)?,
            ticket_id: non_empty(self.ticket_id),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewDto {
    pub username: Option<String>,
    pub description: Option<String>,
    pub ticket_title: Option<String>,
    pub rating_number: Option<Value>,
}

impl UpdateReviewDto {
    pub fn into_update(self) -> Result<ReviewUpdate, String> {
        let (Some(username), Some(description), Some(ticket_title), Some(rating)) = (
            non_empty(self.username),
            non_empty(self.description),
            non_empty(self.ticket_title),
            self.rating_number,
        ) else {
            return Err(REQUIRED_FIELDS.to_string());
        };

        Ok(ReviewUpdate {
            username,
            description,
            ticket_title,
            rating_number: rating_value(&rating)?,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueryDto {
    pub username: Option<String>,
    pub ticket_title: Option<String>,
    pub rating_number: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ReviewQueryDto {
    /// An unparseable or out-of-range rating filter is ignored.
    pub fn to_filter(&self) -> ReviewFilter {
        ReviewFilter {
            username: non_empty(self.username.clone()),
            ticket_title: non_empty(self.ticket_title.clone()),
            rating_number: self
                .rating_number
                .as_deref()
                .and_then(|r| r.trim().parse::<f64>().ok())
                .and_then(|r| parse_rating(r).ok()),
        }
    }
}
