use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::projectdtos::CreateBidDto,
    error::HttpError,
    handler::extract::JsonBody,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn bids_handler() -> Router {
    Router::new().route("/", post(create_bid))
}

pub async fn create_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    JsonBody(body): JsonBody<CreateBidDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bid = app_state
        .project_service
        .create_bid(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": bid
        })),
    ))
}
