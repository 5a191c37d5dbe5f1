use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, service::storage::StorageError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Client {0} not found")]
    ClientNotFound(Uuid),

    #[error("Property {0} not found")]
    PropertyNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Document error: {0}")]
    Document(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::ClientNotFound(_) | ServiceError::PropertyNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::Database(_)
            | ServiceError::Storage(_)
            | ServiceError::Document(_) => HttpError::server_error(error.to_string()),
        }
    }
}
