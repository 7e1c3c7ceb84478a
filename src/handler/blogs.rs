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
    db::blogdb::BlogExt,
    dtos::blogdtos::*,
    error::HttpError,
    utils::pagination::PageRequest,
    AppState,
};

pub fn blog_handler() -> Router {
    Router::new()
        .route("/blogs", get(get_blogs).post(create_blog))
        .route(
            "/blogs/:blog_id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}

pub async fn create_blog(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateBlogDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let new_blog = body.into_new_blog().map_err(HttpError::bad_request)?;

    let blog = app_state
        .db_client
        .save_blog(new_blog)
        .await
        .map_err(HttpError::from_db)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Blog created successfully",
            "blog": blog
        })),
    ))
}

pub async fn get_blog(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(blog_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let blog = app_state
        .db_client
        .get_blog(blog_id)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found("Blog not found"))?;

    Ok(Json(json!({
        "status": "success",
        "blog": blog
    })))
}

pub async fn get_blogs(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<BlogQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let filter = query.to_filter();
    let page = PageRequest::new(query.page, query.limit);

    let blogs = app_state
        .db_client
        .get_blogs(&filter, page.limit(), page.offset())
        .await
        .map_err(HttpError::from_db)?;

    let total = app_state
        .db_client
        .get_blog_count(&filter)
        .await
        .map_err(HttpError::from_db)?;

    Ok(Json(json!({
        "status": "success",
        "blogs": blogs,
        "pagination": page.summary(total, "totalBlogs")
    })))
}

pub async fn update_blog(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(blog_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateBlogDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let update = body.into_update().map_err(HttpError::bad_request)?;

    let blog = app_state
        .db_client
        .update_blog(blog_id, update)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found("Blog not found"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Blog updated successfully",
        "blog": blog
    })))
}

pub async fn delete_blog(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(blog_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_blog(blog_id)
        .await
        .map_err(HttpError::from_db)?
        .ok_or_else(|| HttpError::not_found("Blog not found"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Blog deleted successfully"
    })))
}
