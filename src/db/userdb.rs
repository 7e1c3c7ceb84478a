// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{User, UserProfileUpdate, UserRole};

const USER_COLUMNS: &str =
    "id, fullname, email, password, bio, role, avatar_url, created_at, updated_at";

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn get_agents(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        fullname: T,
        email: T,
        password: T,
        bio: T,
        role: UserRole,
        avatar_url: T,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        email: &str,
        update: UserProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn delete_user(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {} FROM users WHERE id = $1",
                USER_COLUMNS
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {} FROM users WHERE email = $1",
                USER_COLUMNS
            ))
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_agents(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE role = $1",
            USER_COLUMNS
        ))
        .bind(UserRole::Agent)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        fullname: T,
        email: T,
        password: T,
        bio: T,
        role: UserRole,
        avatar_url: T,
    ) -> Result<User, sqlx::Error> {
        let email: String = email.into();

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (fullname, email, password, bio, role, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(fullname.into().trim().to_string())
        .bind(email.trim().to_lowercase())
        .bind(password.into())
        .bind(bio.into())
        .bind(role)
        .bind(avatar_url.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        email: &str,
        update: UserProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET fullname = COALESCE($2, fullname),
                bio = COALESCE($3, bio),
                role = COALESCE($4, role),
                avatar_url = COALESCE($5, avatar_url),
                updated_at = NOW()
            WHERE email = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(email.trim().to_lowercase())
        .bind(update.fullname)
        .bind(update.bio)
        .bind(update.role)
        .bind(update.avatar_url)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE email = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
    }
}
