use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::*;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupUserDto {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub fullname: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(length(max = 1000, message = "Bio must not exceed 1000 characters"))]
    pub bio: Option<String>,

    pub role: Option<UserRole>,

    pub avatar_url: Option<String>,
}

impl SignupUserDto {
    /// Trims the name and lowercases the email so validation sees what gets stored.
    pub fn normalized(self) -> Self {
        SignupUserDto {
            fullname: self.fullname.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            ..self
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Email is required"), email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub fullname: Option<String>,

    #[validate(length(max = 1000, message = "Bio must not exceed 1000 characters"))]
    pub bio: Option<String>,

    pub role: Option<UserRole>,

    pub avatar_url: Option<String>,
}

impl UpdateProfileDto {
    pub fn into_update(self) -> Result<UserProfileUpdate, String> {
        let fullname = match self.fullname {
            Some(name) if name.trim().is_empty() => {
                return Err("Full name cannot be empty".to_string())
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        Ok(UserProfileUpdate {
            fullname,
            bio: self.bio,
            role: self.role,
            avatar_url: self.avatar_url,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EmailQueryDto {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUserDto {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub bio: String,
    pub role: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            fullname: user.fullname.to_owned(),
            email: user.email.to_owned(),
            bio: user.bio.to_owned(),
            role: user.role.to_str().to_string(),
            avatar_url: user.avatar_url.to_owned(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserAuthResponseDto {
    pub status: String,
    pub message: String,
    pub token: String,
    pub user: FilterUserDto,
}
