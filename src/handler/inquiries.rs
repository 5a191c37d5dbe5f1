use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    dtos::authdtos::Response,
    dtos::clientdtos::InquiryDto,
    error::HttpError,
    service::client_service::ClientContact,
    AppState,
};

pub fn inquiries_handler() -> Router {
    Router::new().route("/", post(submit_inquiry))
}

/// Public contact form. The sender becomes (or refreshes) a CRM client and
/// the inquiry context lands in the client notes.
pub async fn submit_inquiry(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<InquiryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let notes = format!(
        "Inquiry interest: {}. Message: {}",
        body.property_type.to_str(),
        body.message
    );

    app_state
        .client_service
        .resolve(ClientContact {
            name: body.name,
            email: body.email,
            phone: body.phone,
            notes: Some(notes),
        })
        .await?;

    Ok(Json(Response {
        status: "success",
        message: "Inquiry received successfully".to_string(),
    }))
}
