use std::sync::Arc;

use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::{
    db::{
        clientdb::ClientExt, propertydb::PropertyExt, tourdb::VirtualTourExt,
        visitdb::SiteVisitExt,
    },
    error::HttpError,
    AppState,
};

/// Dashboard counters for the admin landing page.
pub async fn get_overview(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let clients = app_state
        .db_client
        .get_client_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let properties = app_state
        .db_client
        .get_property_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let upcoming_visits = app_state
        .db_client
        .get_upcoming_visit_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let virtual_tours = app_state
        .db_client
        .get_virtual_tour_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "clients": clients,
            "properties": properties,
            "upcoming_visits": upcoming_visits,
            "virtual_tours": virtual_tours
        }
    })))
}
