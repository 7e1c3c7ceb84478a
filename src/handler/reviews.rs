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
    db::reviewdb::ReviewExt,
    dtos::reviewdtos::*,
    error::HttpError,
    utils::pagination::PageRequest,
    AppState,
};

pub fn review_handler() -> Router {
    Router::new()
        .route("/reviews", get(get_reviews).post(create_review))
        .route(
            "/reviews/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/reviews/c/:ticket_id", get(get_ticket_reviews))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateReviewDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let new_review = body.into_new_review().map_err(HttpError::bad_request)?;

    let review = app_state
        .db_client
        .save_review(new_review)
        .await
        .map_err(HttpError::from_db)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Review created successfully",
            "review": review
        })),
    ))
}

pub async fn get_review(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(review_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .db_client
        .get_review(review_id)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    Ok(Json(json!({
        "status": "success",
        "review": review
    })))
}

pub async fn get_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<ReviewQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let filter = query.to_filter();
    let page = PageRequest::new(query.page, query.limit);

    let reviews = app_state
        .db_client
        .get_reviews(&filter, page.limit(), page.offset())
        .await
        .map_err(HttpError::from_db)?;

    let total = app_state
        .db_client
        .get_review_count(&filter)
        .await
        .map_err(HttpError::from_db)?;

    Ok(Json(json!({
        "status": "success",
        "reviews": reviews,
        "pagination": page.summary(total, "totalReviews")
    })))
}

/// Reviews left on one ticket. The id is matched as an opaque string.
pub async fn get_ticket_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(ticket_id), _): WithRejection<Path<String>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_ticket_reviews(ticket_id.trim())
        .await
        .map_err(HttpError::from_db)?;

    Ok(Json(json!({
        "status": "success",
        "reviews": reviews
    })))
}

pub async fn update_review(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(review_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateReviewDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let update = body.into_update().map_err(HttpError::bad_request)?;

    let review = app_state
        .db_client
        .update_review(review_id, update)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Review updated successfully",
        "review": review
    })))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(review_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Review deleted successfully"
    })))
}
