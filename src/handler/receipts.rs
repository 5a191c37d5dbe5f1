use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::receiptdb::ReceiptExt,
    dtos::authdtos::{ApiResponse, Response},
    dtos::receiptdtos::{IssueReceiptDto, ReceiptListResponseDto},
    error::HttpError,
    AppState,
};

/// Receipts are immutable once issued: list, issue, delete. No update route.
pub fn receipts_handler() -> Router {
    Router::new()
        .route("/", get(get_receipts).post(issue_receipt))
        .route("/:receipt_id", delete(delete_receipt))
}

pub async fn get_receipts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let receipts = app_state
        .db_client
        .get_receipts()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReceiptListResponseDto {
        status: "success".to_string(),
        results: receipts.len(),
        receipts,
    }))
}

pub async fn issue_receipt(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<IssueReceiptDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let receipt = app_state.receipt_service.issue(body).await?;

    Ok(Json(ApiResponse::success(
        "Receipt issued successfully",
        receipt,
    )))
}

pub async fn delete_receipt(
    Path(receipt_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_receipt(receipt_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Receipt not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(Response {
        status: "success",
        message: "Receipt deleted successfully".to_string(),
    }))
}
