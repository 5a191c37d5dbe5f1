use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::admindb::AdminExt,
    dtos::authdtos::{
        AdminData, AdminResponseDto, FilterAdminDto, LoginDto, LoginResponseDto, Response,
    },
    error::{ErrorMessage, HttpError},
    middleware::AdminSession,
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let admin = app_state
        .db_client
        .get_admin_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matches = password::compare(&body.password, &admin.password)
        .map_err(|e| HttpError::unauthorized(e.to_string()))?;

    if !password_matches {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        &admin.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(time::Duration::minutes(app_state.env.jwt_maxage))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Cookie header could not be built"))?,
    );

    let mut response = Json(LoginResponseDto {
        status: "success".to_string(),
        token,
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::new(-1, 0))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Cookie header could not be built"))?,
    );

    let mut response = Json(Response {
        status: "success",
        message: "Logged out successfully".to_string(),
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn current_admin(
    Extension(session): Extension<AdminSession>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_admin = FilterAdminDto::filter_admin(&session.admin);

    let response_data = AdminResponseDto {
        status: "success".to_string(),
        data: AdminData {
            admin: filtered_admin,
        },
    };

    Ok(Json(response_data))
}
