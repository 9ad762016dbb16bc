use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response as AxumResponse},
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    dtos::userdtos::{
        FilterUserDto, LoginUserDto, RegisterUserDto, Response, UpdateProfileDto, UserData,
        UserLoginResponseDto, UserResponseDto,
    },
    error::HttpError,
    handler::extract::JsonBody,
    middleware::{auth, JWTAuthMiddeware},
    models::usermodel::User,
    utils::token,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_me).layer(middleware::from_fn(auth)))
        .route("/profile", put(update_profile).layer(middleware::from_fn(auth)))
}

fn set_cookie(response: AxumResponse, cookie: Cookie<'_>) -> Result<AxumResponse, HttpError> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, value);

    let mut response = response;
    response.headers_mut().extend(headers);
    Ok(response)
}

/// Issues a token for `user` and answers with it in both the body and the
/// `token` cookie.
fn signed_in_response(
    app_state: &AppState,
    user: &User,
    status: StatusCode,
) -> Result<AxumResponse, HttpError> {
    let token = token::create_token(
        &user.id.to_string(),
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

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
        data: UserData {
            user: FilterUserDto::filter_user(user),
        },
    });

    set_cookie((status, response).into_response(), cookie)
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(body): JsonBody<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .user_service
        .register(body)
        .await
        .map_err(HttpError::from)?;

    signed_in_response(&app_state, &user, StatusCode::CREATED)
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .user_service
        .authenticate(body)
        .await
        .map_err(HttpError::from)?;

    signed_in_response(&app_state, &user, StatusCode::OK)
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let response = Json(Response {
        status: "success",
        message: "Logged out successfully".to_string(),
    });

    set_cookie(response.into_response(), cookie)
}

pub async fn get_me(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&auth.user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData { user: filtered_user },
    }))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    JsonBody(body): JsonBody<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .user_service
        .update_profile(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}
