use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use futures::future::try_join_all;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::clientdb::ClientExt,
    dtos::authdtos::{ApiResponse, Response},
    dtos::clientdtos::{ClientListResponseDto, ClientResponseDto, SaveClientDto, UpdateClientDto},
    error::HttpError,
    service::storage::{object_key, CLIENT_DOCUMENTS_BUCKET},
    AppState,
};

pub fn clients_handler() -> Router {
    Router::new()
        .route("/", get(get_clients).post(create_client))
        .route(
            "/:client_id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/:client_id/documents", post(upload_client_documents))
}

pub async fn get_clients(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let clients = app_state
        .db_client
        .get_clients()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ClientListResponseDto {
        status: "success".to_string(),
        results: clients.len(),
        clients,
    }))
}

pub async fn create_client(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveClientDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let client = app_state
        .db_client
        .save_client(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Client created successfully",
        client,
    )))
}

pub async fn get_client(
    Path(client_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let client = app_state
        .db_client
        .get_client_by_id(client_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Client not found"))?;

    Ok(Json(ClientResponseDto {
        status: "success".to_string(),
        data: client,
    }))
}

pub async fn update_client(
    Path(client_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateClientDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let client = app_state
        .db_client
        .update_client(client_id, body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Client not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(ApiResponse::success(
        "Client updated successfully",
        client,
    )))
}

pub async fn delete_client(
    Path(client_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_client(client_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Client not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(Response {
        status: "success",
        message: "Client deleted successfully".to_string(),
    }))
}

/// Multipart upload of one or more documents; every file lands in the
/// client-documents bucket and its public URL is appended to the record.
pub async fn upload_client_documents(
    Path(client_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let client = app_state
        .db_client
        .get_client_by_id(client_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Client not found"))?;

    let mut files = Vec::new();
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

        files.push((file_name, content_type, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(HttpError::bad_request("No files provided"));
    }

    let uploads = files.into_iter().map(|(file_name, content_type, bytes)| {
        let key = object_key(client.id, &file_name);
        let storage = app_state.storage.clone();
        async move {
            storage
                .upload(CLIENT_DOCUMENTS_BUCKET, &key, bytes, &content_type)
                .await
        }
    });

    let stored = try_join_all(uploads)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let document_urls: Vec<String> = stored.into_iter().map(|object| object.public_url).collect();

    let updated = app_state
        .db_client
        .append_client_documents(client.id, &document_urls)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Documents uploaded successfully",
        updated,
    )))
}
