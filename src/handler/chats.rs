use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::chatdtos::CreateChatDto,
    error::HttpError,
    handler::extract::JsonBody,
    middleware::JWTAuthMiddeware,
    models::chatmodel::HideOutcome,
    AppState,
};

pub fn chats_handler() -> Router {
    Router::new()
        .route("/", get(get_user_chats).post(create_chat))
        .route("/:chat_id", delete(delete_chat))
        .route("/:chat_id/messages", get(get_messages))
        .route("/:chat_id/read", put(mark_chat_as_read))
}

pub async fn create_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    JsonBody(body): JsonBody<CreateChatDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (chat, created) = app_state
        .chat_service
        .open_chat(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };

    Ok((
        status,
        Json(serde_json::json!({
            "status": "success",
            "data": chat
        })),
    ))
}

pub async fn get_user_chats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let chats = app_state
        .chat_service
        .list_chats(&auth.user)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": chats
    })))
}

pub async fn get_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .chat_service
        .list_messages(&auth.user, chat_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": messages
    })))
}

pub async fn mark_chat_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let marked = app_state
        .chat_service
        .mark_read(&auth.user, chat_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "marked": marked }
    })))
}

pub async fn delete_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = app_state
        .chat_service
        .hide_chat(&auth.user, chat_id)
        .await
        .map_err(HttpError::from)?;

    let message = match outcome {
        HideOutcome::Hidden => "Chat removed from your list",
        HideOutcome::Deleted => "Chat deleted",
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": message
    })))
}
