use std::sync::Arc;

use crate::{
    db::{
        clientdb::ClientExt,
        propertydb::PropertyExt,
        receiptdb::{NewReceipt, ReceiptExt},
    },
    dtos::receiptdtos::IssueReceiptDto,
    models::receiptmodel::Receipt,
    service::{
        error::ServiceError,
        receipt_document::{self, ReceiptContent, ReceiptDetails},
        storage::{object_key, ObjectStorage, RECEIPTS_BUCKET},
    },
    utils::reference::generate_receipt_number,
};

/// Issues receipts: number, document, upload, record, in that order.
pub struct ReceiptService<S> {
    db_client: Arc<S>,
    storage: Arc<dyn ObjectStorage>,
    http: reqwest::Client,
}

impl<S> Clone for ReceiptService<S> {
    fn clone(&self) -> Self {
        Self {
            db_client: self.db_client.clone(),
            storage: self.storage.clone(),
            http: self.http.clone(),
        }
    }
}

impl<S> std::fmt::Debug for ReceiptService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptService").finish_non_exhaustive()
    }
}

impl<S> ReceiptService<S>
where
    S: ClientExt + PropertyExt + ReceiptExt + Send + Sync,
{
    pub fn new(db_client: Arc<S>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            db_client,
            storage,
            http: reqwest::Client::new(),
        }
    }

    /// Runs the issuance chain. The first failing step ends the run and
    /// nothing compensates: a persist failure after a successful upload
    /// leaves the document orphaned in storage.
    pub async fn issue(&self, input: IssueReceiptDto) -> Result<Receipt, ServiceError> {
        if input.amount <= 0.0 {
            return Err(ServiceError::Validation(format!(
                "Receipt amount must be positive, got {}",
                input.amount
            )));
        }

        let client = self
            .db_client
            .get_client_by_id(input.client_id)
            .await?
            .ok_or(ServiceError::ClientNotFound(input.client_id))?;

        let property = self
            .db_client
            .get_property_by_id(input.property_id)
            .await?
            .ok_or(ServiceError::PropertyNotFound(input.property_id))?;

        let receipt_number = generate_receipt_number();

        let content = ReceiptContent::compose(
            &ReceiptDetails {
                receipt_number: &receipt_number,
                amount: input.amount,
                issued_at: input.issued_at,
                company_name: &input.company_name,
                company_address: input.company_address.as_deref(),
            },
            &client,
            &property,
        )
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let logo_bytes = match &input.logo_url {
            Some(url) => self.fetch_logo(url).await,
            None => None,
        };

        let pdf_bytes = receipt_document::render(&content, logo_bytes.as_deref())
            .map_err(|e| ServiceError::Document(e.to_string()))?;

        let key = object_key(client.id, &content.file_name);
        let stored = self
            .storage
            .upload(RECEIPTS_BUCKET, &key, pdf_bytes, "application/pdf")
            .await?;

        let receipt = self
            .db_client
            .save_receipt(NewReceipt {
                client_id: client.id,
                property_id: property.id,
                amount: input.amount,
                receipt_number,
                receipt_url: stored.public_url,
                issued_at: input.issued_at,
            })
            .await?;

        tracing::info!(
            "Issued receipt {} for client {} on property {}",
            receipt.receipt_number,
            client.id,
            property.id
        );

        Ok(receipt)
    }

    // Logo problems degrade to a receipt without a logo, never an error.
    async fn fetch_logo(&self, url: &str) -> Option<Vec<u8>> {
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => Some(bytes.to_vec()),
                Err(err) => {
                    tracing::warn!("Receipt logo body from {} unreadable: {}", url, err);
                    None
                }
            },
            Ok(response) => {
                tracing::warn!(
                    "Receipt logo fetch from {} returned HTTP {}",
                    url,
                    response.status()
                );
                None
            }
            Err(err) => {
                tracing::warn!("Receipt logo fetch from {} failed: {}", url, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::{
        models::propertymodel::PropertyCategory,
        service::test_support::{client_named, property_named, MemoryDb, MemoryStorage},
    };

    fn issue_dto(client_id: Uuid, property_id: Uuid) -> IssueReceiptDto {
        IssueReceiptDto {
            client_id,
            property_id,
            amount: 50000.0,
            issued_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            company_name: "Dream Avenue Realty".to_string(),
            company_address: Some("12 Marina Road, Lagos".to_string()),
            logo_url: None,
        }
    }

    async fn seeded() -> (Arc<MemoryDb>, Uuid, Uuid) {
        let db = Arc::new(MemoryDb::default());
        let client = client_named("A. Smith", "a.smith@example.com");
        let property = property_named("Plot 7", PropertyCategory::Plot, 50000.0);
        let (client_id, property_id) = (client.id, property.id);
        db.seed_client(client).await;
        db.seed_property(property).await;
        (db, client_id, property_id)
    }

    #[tokio::test]
    async fn issues_a_receipt_end_to_end() {
        let (db, client_id, property_id) = seeded().await;
        let storage = Arc::new(MemoryStorage::default());
        let service = ReceiptService::new(db.clone(), storage.clone());

        let receipt = service.issue(issue_dto(client_id, property_id)).await.unwrap();

        assert_eq!(receipt.amount, 50000.0);
        assert_eq!(receipt.client_id, Some(client_id));
        assert_eq!(receipt.property_id, Some(property_id));
        assert_eq!(receipt.receipt_number.len(), 8);
        assert_eq!(
            receipt.issued_at,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(receipt.receipt_url.contains("/receipts/"));

        let uploads = storage.uploads.lock().await;
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].bucket, RECEIPTS_BUCKET);
        assert_eq!(uploads[0].content_type, "application/pdf");
        assert!(uploads[0].key.starts_with(&client_id.to_string()));
        assert!(uploads[0].key.ends_with(".pdf"));
        assert!(uploads[0].bytes.starts_with(b"%PDF"));
        assert_eq!(db.receipts.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn non_positive_amount_stops_before_any_side_effect() {
        let (db, client_id, property_id) = seeded().await;
        let storage = Arc::new(MemoryStorage::default());
        let service = ReceiptService::new(db.clone(), storage.clone());

        for amount in [0.0, -250.0] {
            let mut dto = issue_dto(client_id, property_id);
            dto.amount = amount;
            let result = service.issue(dto).await;
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }

        assert!(storage.uploads.lock().await.is_empty());
        assert!(db.receipts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_client_fails_before_upload() {
        let (db, _, property_id) = seeded().await;
        let storage = Arc::new(MemoryStorage::default());
        let service = ReceiptService::new(db.clone(), storage.clone());

        let missing = Uuid::new_v4();
        let result = service.issue(issue_dto(missing, property_id)).await;

        assert!(matches!(result, Err(ServiceError::ClientNotFound(id)) if id == missing));
        assert!(storage.uploads.lock().await.is_empty());
        assert!(db.receipts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_property_fails_before_upload() {
        let (db, client_id, _) = seeded().await;
        let storage = Arc::new(MemoryStorage::default());
        let service = ReceiptService::new(db.clone(), storage.clone());

        let missing = Uuid::new_v4();
        let result = service.issue(issue_dto(client_id, missing)).await;

        assert!(matches!(result, Err(ServiceError::PropertyNotFound(id)) if id == missing));
        assert!(storage.uploads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn upload_failure_persists_no_record() {
        let (db, client_id, property_id) = seeded().await;
        let storage = Arc::new(MemoryStorage::default());
        storage.fail_uploads.store(true, Ordering::SeqCst);
        let service = ReceiptService::new(db.clone(), storage);

        let result = service.issue(issue_dto(client_id, property_id)).await;

        assert!(matches!(result, Err(ServiceError::Storage(_))));
        assert!(db.receipts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn persist_failure_leaves_the_uploaded_document() {
        let (db, client_id, property_id) = seeded().await;
        db.fail_receipt_writes.store(true, Ordering::SeqCst);
        let storage = Arc::new(MemoryStorage::default());
        let service = ReceiptService::new(db.clone(), storage.clone());

        let result = service.issue(issue_dto(client_id, property_id)).await;

        // No compensation: the document stays in the bucket as an orphan.
        assert!(matches!(result, Err(ServiceError::Database(_))));
        assert_eq!(storage.uploads.lock().await.len(), 1);
        assert!(db.receipts.lock().await.is_empty());
    }
}
