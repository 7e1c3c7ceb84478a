use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    dtos::chatdtos::*,
    error::HttpError,
    middleware::Credential,
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/chats/ticket/:ticket_id", get(get_ticket_chat))
        .route("/chats/ticket/:ticket_id/message", post(send_message))
        .route("/chats/ticket/:ticket_id/new-messages", get(get_new_messages))
        .route("/chats/ticket/:ticket_id/message/:message_id", put(edit_message))
        .route(
            "/chats/ticket/:ticket_id/message/:message_id/:user_id",
            delete(delete_message),
        )
        .route("/chats/:chat_id/messages", get(get_chat_messages))
}

/// Reading a ticket's chat creates it on first access.
pub async fn get_ticket_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let thread = app_state.chat_service.get_or_create_thread(ticket_id).await?;

    Ok(Json(ChatThreadResponseDto::from_thread(thread)))
}

pub async fn get_chat_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(chat_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let thread = app_state.chat_service.get_thread(chat_id).await?;

    Ok(Json(ChatThreadResponseDto::from_thread(thread)))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<SendMessageDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let posted = app_state.chat_service.post_message(ticket_id, body).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageSentResponseDto {
            status: "success".to_string(),
            message: posted.message,
            chat_id: posted.chat_id,
            ticket_id: posted.ticket_id,
        }),
    ))
}

pub async fn get_new_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Query(query), _): WithRejection<Query<NewMessagesQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let polled = app_state
        .chat_service
        .new_messages_since(ticket_id, query.last_seen_timestamp.as_deref())
        .await?;

    Ok(Json(NewMessagesResponseDto {
        status: "success".to_string(),
        chat_id: polled.chat_id,
        ticket_id: polled.ticket_id,
        total_new: polled.new_messages.len(),
        new_messages: polled.new_messages,
        last_updated: polled.last_updated,
    }))
}

pub async fn edit_message(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path((ticket_id, message_id)), _): WithRejection<
        Path<(Uuid, Uuid)>,
        HttpError,
    >,
    credential: Credential,
    WithRejection(Json(body), _): WithRejection<Json<EditMessageDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .chat_service
        .edit_message(ticket_id, message_id, body, &credential)
        .await?;

    Ok(Json(MessageUpdatedResponseDto {
        status: "success".to_string(),
        message: "Message updated successfully".to_string(),
        updated_message: updated,
    }))
}

pub async fn delete_message(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path((ticket_id, message_id, user_id)), _): WithRejection<
        Path<(Uuid, Uuid, String)>,
        HttpError,
    >,
    credential: Credential,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .chat_service
        .delete_message(ticket_id, message_id, &user_id, &credential)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Message deleted successfully"
    })))
}
