use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{propertydb::PropertyExt, visitdb::SiteVisitExt},
    dtos::authdtos::{ApiResponse, Response},
    dtos::visitdtos::{
        ScheduleSiteVisitDto, SiteVisitListResponseDto, SiteVisitRequestDto, UpdateSiteVisitDto,
    },
    error::HttpError,
    models::visitmodel::VisitStatus,
    service::client_service::ClientContact,
    AppState,
};

pub fn visits_handler() -> Router {
    Router::new()
        .route("/", get(get_site_visits).post(schedule_site_visit))
        .route(
            "/:visit_id",
            put(update_site_visit).delete(delete_site_visit),
        )
}

pub async fn get_site_visits(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let visits = app_state
        .db_client
        .get_site_visits()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SiteVisitListResponseDto {
        status: "success".to_string(),
        results: visits.len(),
        visits,
    }))
}

pub async fn schedule_site_visit(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ScheduleSiteVisitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let visit = app_state
        .db_client
        .save_site_visit(
            body.client_id,
            body.property_id,
            body.scheduled_date,
            body.status,
            body.notes,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Site visit scheduled successfully",
        visit,
    )))
}

pub async fn update_site_visit(
    Path(visit_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateSiteVisitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let visit = app_state
        .db_client
        .update_site_visit(visit_id, body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Site visit not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(ApiResponse::success(
        "Site visit updated successfully",
        visit,
    )))
}

pub async fn delete_site_visit(
    Path(visit_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_site_visit(visit_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Site visit not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(Response {
        status: "success",
        message: "Site visit deleted successfully".to_string(),
    }))
}

/// Public booking from a property page. The contact fields go through
/// client resolution, then an upcoming visit is created for the property.
pub async fn request_site_visit(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SiteVisitRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let client = app_state
        .client_service
        .resolve(ClientContact {
            name: body.name,
            email: body.email,
            phone: body.phone,
            notes: None,
        })
        .await?;

    let visit = app_state
        .db_client
        .save_site_visit(
            client.id,
            property.id,
            body.scheduled_date,
            VisitStatus::Upcoming,
            body.notes,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Site visit requested successfully",
        visit,
    )))
}
