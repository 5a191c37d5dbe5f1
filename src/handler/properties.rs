use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::propertydb::PropertyExt,
    dtos::authdtos::{ApiResponse, Response},
    dtos::propertydtos::{
        PropertyListResponseDto, PropertyResponseDto, SavePropertyDto, UpdatePropertyDto,
    },
    error::HttpError,
    handler::visits::request_site_visit,
    AppState,
};

/// Catalogue routes, no auth.
pub fn public_properties_handler() -> Router {
    Router::new()
        .route("/", get(get_properties))
        .route("/featured", get(get_featured_properties))
        .route("/:property_id", get(get_property))
        .route("/:property_id/visit-requests", post(request_site_visit))
}

pub fn admin_properties_handler() -> Router {
    Router::new().route("/", post(create_property)).route(
        "/:property_id",
        put(update_property).delete(delete_property),
    )
}

pub async fn get_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .get_properties()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyListResponseDto {
        status: "success".to_string(),
        results: properties.len(),
        properties,
    }))
}

pub async fn get_featured_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .get_featured_properties()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyListResponseDto {
        status: "success".to_string(),
        results: properties.len(),
        properties,
    }))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    Ok(Json(PropertyResponseDto {
        status: "success".to_string(),
        data: property,
    }))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .save_property(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Property created successfully",
        property,
    )))
}

pub async fn update_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .update_property(property_id, body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Property not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(ApiResponse::success(
        "Property updated successfully",
        property,
    )))
}

pub async fn delete_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Property not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(Response {
        status: "success",
        message: "Property deleted successfully".to_string(),
    }))
}
