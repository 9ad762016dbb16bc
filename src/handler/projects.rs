use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    handler::Handler,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::projectdtos::{ProjectDto, ProjectQueryDto, UpdateProjectStatusDto},
    error::HttpError,
    handler::extract::JsonBody,
    middleware::{auth, JWTAuthMiddeware},
    AppState,
};

pub fn projects_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(list_projects).post(create_project.layer(middleware::from_fn(auth))),
        )
        .route(
            "/:project_id",
            get(get_project)
                .put(update_project.layer(middleware::from_fn(auth)))
                .delete(delete_project.layer(middleware::from_fn(auth))),
        )
        .route(
            "/:project_id/status",
            put(update_project_status).layer(middleware::from_fn(auth)),
        )
        .route(
            "/:project_id/bids",
            get(get_project_bids).layer(middleware::from_fn(auth)),
        )
}

pub async fn list_projects(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ProjectQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let projects = app_state
        .project_service
        .list_projects(query.into())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": projects
    })))
}

pub async fn get_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let project = app_state
        .project_service
        .get_project(project_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": project
    })))
}

pub async fn create_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    JsonBody(body): JsonBody<ProjectDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .project_service
        .create_project(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": project
        })),
    ))
}

pub async fn update_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    JsonBody(body): JsonBody<ProjectDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .project_service
        .update_project(&auth.user, project_id, body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": project
    })))
}

pub async fn update_project_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    JsonBody(body): JsonBody<UpdateProjectStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let project = app_state
        .project_service
        .update_project_status(&auth.user, project_id, body.status)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": project
    })))
}

pub async fn delete_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .project_service
        .archive_project(&auth.user, project_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Project deleted successfully"
    })))
}

pub async fn get_project_bids(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = app_state
        .project_service
        .list_bids(&auth.user, project_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": bids
    })))
}
