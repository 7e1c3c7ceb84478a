use std::str::FromStr;

use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Agent,
    Customer,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Agent => "agent",
            UserRole::Customer => "customer",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(UserRole::Admin),
            "agent" => Ok(UserRole::Agent),
            "customer" => Ok(UserRole::Customer),
            _ => Err("must be one of: customer, agent, admin".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub role: UserRole,
    pub avatar_url: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields a profile edit may touch; `None` leaves the column as it is.
#[derive(Debug, Default, Clone)]
pub struct UserProfileUpdate {
    pub fullname: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
    pub avatar_url: Option<String>,
}
