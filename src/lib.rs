pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod utils;

use std::sync::Arc;

use config::Config;
use db::db::DBClient;
use service::{
    client_service::ClientService, receipt_service::ReceiptService, storage::ObjectStorage,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub client_service: ClientService<DBClient>,
    pub receipt_service: ReceiptService<DBClient>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    pub fn new(db_client: DBClient, storage: Arc<dyn ObjectStorage>, config: Config) -> Self {
        let db_client = Arc::new(db_client);

        let client_service = ClientService::new(db_client.clone());
        let receipt_service = ReceiptService::new(db_client.clone(), storage.clone());

        Self {
            env: config,
            db_client,
            client_service,
            receipt_service,
            storage,
        }
    }
}
