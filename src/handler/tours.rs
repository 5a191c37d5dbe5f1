use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{propertydb::PropertyExt, tourdb::VirtualTourExt},
    dtos::authdtos::{ApiResponse, Response},
    dtos::tourdtos::{SaveVirtualTourDto, UpdateVirtualTourDto, VirtualTourListResponseDto},
    error::HttpError,
    service::storage::{object_key, VIRTUAL_TOURS_BUCKET},
    AppState,
};

pub fn public_tours_handler() -> Router {
    Router::new().route("/", get(get_virtual_tours))
}

pub fn admin_tours_handler() -> Router {
    Router::new()
        .route("/", post(create_virtual_tour))
        .route(
            "/:tour_id",
            put(update_virtual_tour).delete(delete_virtual_tour),
        )
        .route("/:tour_id/asset", post(upload_tour_asset))
}

pub async fn get_virtual_tours(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tours = app_state
        .db_client
        .get_virtual_tours()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(VirtualTourListResponseDto {
        status: "success".to_string(),
        results: tours.len(),
        tours,
    }))
}

pub async fn create_virtual_tour(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveVirtualTourDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_property_by_id(body.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let tour = app_state
        .db_client
        .save_virtual_tour(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Virtual tour created successfully",
        tour,
    )))
}

pub async fn update_virtual_tour(
    Path(tour_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateVirtualTourDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let tour = app_state
        .db_client
        .update_virtual_tour(tour_id, body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Virtual tour not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(ApiResponse::success(
        "Virtual tour updated successfully",
        tour,
    )))
}

pub async fn delete_virtual_tour(
    Path(tour_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_virtual_tour(tour_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Virtual tour not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(Response {
        status: "success",
        message: "Virtual tour deleted successfully".to_string(),
    }))
}

/// Multipart upload of the tour media file; the stored public URL replaces
/// any previous asset path.
pub async fn upload_tour_asset(
    Path(tour_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let tour = app_state
        .db_client
        .get_virtual_tour_by_id(tour_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Virtual tour not found"))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;

        upload = Some((file_name, content_type, bytes.to_vec()));
        break;
    }

    let (file_name, content_type, bytes) =
        upload.ok_or_else(|| HttpError::bad_request("No file provided"))?;

    // Assets for a tour whose property was removed key under the tour id.
    let owner_id = tour.property_id.unwrap_or(tour.id);
    let key = object_key(owner_id, &file_name);

    let stored = app_state
        .storage
        .upload(VIRTUAL_TOURS_BUCKET, &key, bytes, &content_type)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let tour = app_state
        .db_client
        .set_tour_asset(tour.id, stored.public_url)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Tour asset uploaded successfully",
        tour,
    )))
}
