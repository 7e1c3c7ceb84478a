use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::{cookie::Cookie, WithRejection};
use serde_json::json;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::*,
    error::{ErrorMessage, HttpError},
    models::usermodel::User,
    utils::{password, token},
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/profiles", get(get_profiles))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map_or(false, |db_error| db_error.is_unique_violation())
}

fn require_email(query: EmailQueryDto) -> Result<String, HttpError> {
    query
        .email
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::EmailRequired.to_string()))
}

/// Issues a token for `user` and answers with it both in the body and as
/// an http-only cookie.
fn auth_response(
    app_state: &AppState,
    user: &User,
    status: StatusCode,
    message: &str,
) -> Result<Response, HttpError> {
    let token = token::create_token(
        &user.id.to_string(),
        user.role.to_str(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let body = Json(UserAuthResponseDto {
        status: "success".to_string(),
        message: message.to_string(),
        token,
        user: FilterUserDto::filter_user(user),
    });

    let cookie_header = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut response = (status, body).into_response();
    response.headers_mut().append(header::SET_COOKIE, cookie_header);

    Ok(response)
}

pub async fn signup(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<SignupUserDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let body = body.normalized();
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let email = body.email.clone();

    let existing_user = app_state
        .db_client
        .get_user(None, Some(&email))
        .await
        .map_err(HttpError::from_db)?;

    if existing_user.is_some() {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password = password::hash(&body.password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(
            body.fullname,
            email,
            hashed_password,
            body.bio.unwrap_or_default(),
            body.role.unwrap_or_default(),
            body.avatar_url.unwrap_or_default(),
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HttpError::bad_request(ErrorMessage::EmailExist.to_string())
            } else {
                HttpError::from_db(e)
            }
        })?;

    tracing::info!("user {} signed up as {}", user.id, user.role.to_str());

    auth_response(&app_state, &user, StatusCode::CREATED, "User registered successfully")
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<LoginUserDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(HttpError::from_db)?;

    let user = result.ok_or(HttpError::bad_request(
        ErrorMessage::WrongCredentials.to_string(),
    ))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        return Err(HttpError::bad_request(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    auth_response(&app_state, &user, StatusCode::OK, "Login successful")
}

pub async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let email = require_email(query)?;

    let user = app_state
        .db_client
        .get_user(None, Some(&email))
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "user": FilterUserDto::filter_user(&user)
    })))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQueryDto>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateProfileDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let email = require_email(query)?;
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let update = body.into_update().map_err(HttpError::bad_request)?;

    let user = app_state
        .db_client
        .update_user_profile(&email, update)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Profile updated successfully",
        "user": FilterUserDto::filter_user(&user)
    })))
}

pub async fn delete_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let email = require_email(query)?;

    app_state
        .db_client
        .delete_user(&email)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "message": "User deleted successfully"
    })))
}

pub async fn get_profiles(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .get_users()
        .await
        .map_err(HttpError::from_db)?;

    Ok(Json(json!({
        "status": "success",
        "users": FilterUserDto::filter_users(&users)
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_email_is_required_and_normalized() {
        let missing = require_email(EmailQueryDto { email: None }).unwrap_err();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);

        let blank = require_email(EmailQueryDto {
            email: Some("  ".to_string()),
        });
        assert!(blank.is_err());

        let email = require_email(EmailQueryDto {
            email: Some(" Al@Desk.Test ".to_string()),
        })
        .unwrap();
        assert_eq!(email, "al@desk.test");
    }
}
