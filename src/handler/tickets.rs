use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;

use crate::{
    dtos::ticketdtos::*,
    error::HttpError,
    utils::pagination::PageRequest,
    AppState,
};

pub fn ticket_handler() -> Router {
    Router::new()
        .route("/tickets", get(get_tickets).post(create_ticket))
        .route(
            "/tickets/:ticket_id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}

pub async fn create_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateTicketDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state.ticket_service.create_ticket(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Ticket created successfully",
            "ticket": ticket
        })),
    ))
}

pub async fn get_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state.ticket_service.get_ticket(ticket_id).await?;

    Ok(Json(json!({
        "status": "success",
        "ticket": ticket
    })))
}

pub async fn get_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<TicketQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let filter = query.to_filter().map_err(HttpError::bad_request)?;
    let page = PageRequest::new(query.page, query.limit);

    let (tickets, total) = app_state.ticket_service.list_tickets(&filter, page).await?;

    Ok(Json(json!({
        "status": "success",
        "tickets": tickets,
        "pagination": page.summary(total, "totalTickets")
    })))
}

pub async fn update_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateTicketDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state
        .ticket_service
        .update_ticket(ticket_id, body)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Ticket updated successfully",
        "ticket": ticket
    })))
}

pub async fn delete_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.ticket_service.delete_ticket(ticket_id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Ticket deleted successfully"
    })))
}
