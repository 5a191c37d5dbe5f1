//! In-memory doubles for the storage-backed traits, shared by the
//! service test modules.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::prelude::*;
use sqlx::types::Json;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    db::{
        clientdb::ClientExt,
        propertydb::{PropertyExt, FEATURED_LIMIT},
        receiptdb::{NewReceipt, ReceiptExt},
    },
    dtos::{
        clientdtos::{SaveClientDto, UpdateClientDto},
        propertydtos::{SavePropertyDto, UpdatePropertyDto},
    },
    models::{
        clientmodel::Client,
        propertymodel::{Property, PropertyCategory},
        receiptmodel::{Receipt, ReceiptWithRelations},
    },
    service::storage::{ObjectStorage, StorageError, StoredObject},
};

/// Vec-backed stand-in for the Postgres client. Write failures are
/// simulated by flipping the fail toggles.
#[derive(Debug, Default)]
pub(crate) struct MemoryDb {
    pub clients: Mutex<Vec<Client>>,
    pub properties: Mutex<Vec<Property>>,
    pub receipts: Mutex<Vec<Receipt>>,
    pub client_inserts: AtomicU64,
    pub client_updates: AtomicU64,
    pub fail_client_writes: AtomicBool,
    pub fail_receipt_writes: AtomicBool,
}

impl MemoryDb {
    pub async fn seed_client(&self, client: Client) {
        self.clients.lock().await.push(client);
    }

    pub async fn seed_property(&self, property: Property) {
        self.properties.lock().await.push(property);
    }
}

#[async_trait]
impl ClientExt for MemoryDb {
    async fn get_clients(&self) -> Result<Vec<Client>, sqlx::Error> {
        Ok(self.clients.lock().await.clone())
    }

    async fn get_client_by_id(&self, client_id: Uuid) -> Result<Option<Client>, sqlx::Error> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
            .find(|c| c.id == client_id)
            .cloned())
    }

    async fn get_client_by_email(&self, email: &str) -> Result<Option<Client>, sqlx::Error> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn get_client_count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.clients.lock().await.len() as i64)
    }

    async fn save_client(&self, data: SaveClientDto) -> Result<Client, sqlx::Error> {
        if self.fail_client_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        self.client_inserts.fetch_add(1, Ordering::SeqCst);

        let client = Client {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            documents: None,
            purchase_history: data.purchase_history,
            notes: data.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.clients.lock().await.push(client.clone());
        Ok(client)
    }

    async fn update_client(
        &self,
        client_id: Uuid,
        data: UpdateClientDto,
    ) -> Result<Client, sqlx::Error> {
        if self.fail_client_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        self.client_updates.fetch_add(1, Ordering::SeqCst);

        let mut clients = self.clients.lock().await;
        let client = clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or(sqlx::Error::RowNotFound)?;

        // Absent fields keep their stored value, like the COALESCE update.
        if let Some(name) = data.name {
            client.name = name;
        }
        if let Some(email) = data.email {
            client.email = email;
        }
        if let Some(phone) = data.phone {
            client.phone = phone;
        }
        if let Some(purchase_history) = data.purchase_history {
            client.purchase_history = Some(purchase_history);
        }
        if let Some(notes) = data.notes {
            client.notes = Some(notes);
        }
        client.updated_at = Utc::now();
        Ok(client.clone())
    }

    async fn append_client_documents(
        &self,
        client_id: Uuid,
        document_urls: &[String],
    ) -> Result<Client, sqlx::Error> {
        let mut clients = self.clients.lock().await;
        let client = clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or(sqlx::Error::RowNotFound)?;

        let mut documents = client.documents.take().map(|docs| docs.0).unwrap_or_default();
        documents.extend(document_urls.iter().cloned());
        client.documents = Some(Json(documents));
        Ok(client.clone())
    }

    async fn delete_client(&self, client_id: Uuid) -> Result<(), sqlx::Error> {
        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|c| c.id != client_id);
        if clients.len() == before {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyExt for MemoryDb {
    async fn get_properties(&self) -> Result<Vec<Property>, sqlx::Error> {
        Ok(self.properties.lock().await.clone())
    }

    async fn get_featured_properties(&self) -> Result<Vec<Property>, sqlx::Error> {
        Ok(self
            .properties
            .lock()
            .await
            .iter()
            .filter(|p| p.is_featured)
            .take(FEATURED_LIMIT as usize)
            .cloned()
            .collect())
    }

    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        Ok(self
            .properties
            .lock()
            .await
            .iter()
            .find(|p| p.id == property_id)
            .cloned())
    }

    async fn get_property_count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.properties.lock().await.len() as i64)
    }

    async fn save_property(&self, data: SavePropertyDto) -> Result<Property, sqlx::Error> {
        let property = Property {
            id: Uuid::new_v4(),
            name: data.name,
            category: data.category,
            location: data.location,
            price: data.price,
            description: data.description,
            short_description: data.short_description,
            images: data.images.map(Json),
            virtual_tour_url: data.virtual_tour_url,
            is_featured: data.is_featured.unwrap_or(false),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.properties.lock().await.push(property.clone());
        Ok(property)
    }

    async fn update_property(
        &self,
        property_id: Uuid,
        data: UpdatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        let mut properties = self.properties.lock().await;
        let property = properties
            .iter_mut()
            .find(|p| p.id == property_id)
            .ok_or(sqlx::Error::RowNotFound)?;

        if let Some(name) = data.name {
            property.name = name;
        }
        if let Some(category) = data.category {
            property.category = category;
        }
        if let Some(location) = data.location {
            property.location = Some(location);
        }
        if let Some(price) = data.price {
            property.price = price;
        }
        if let Some(description) = data.description {
            property.description = Some(description);
        }
        if let Some(short_description) = data.short_description {
            property.short_description = Some(short_description);
        }
        if let Some(images) = data.images {
            property.images = Some(Json(images));
        }
        if let Some(virtual_tour_url) = data.virtual_tour_url {
            property.virtual_tour_url = Some(virtual_tour_url);
        }
        if let Some(is_featured) = data.is_featured {
            property.is_featured = is_featured;
        }
        property.updated_at = Utc::now();
        Ok(property.clone())
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error> {
        let mut properties = self.properties.lock().await;
        let before = properties.len();
        properties.retain(|p| p.id != property_id);
        if properties.len() == before {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ReceiptExt for MemoryDb {
    async fn get_receipts(&self) -> Result<Vec<ReceiptWithRelations>, sqlx::Error> {
        let receipts = self.receipts.lock().await;
        let clients = self.clients.lock().await;
        let properties = self.properties.lock().await;

        Ok(receipts
            .iter()
            .map(|receipt| ReceiptWithRelations {
                receipt: receipt.clone(),
                client: receipt
                    .client_id
                    .and_then(|id| clients.iter().find(|c| c.id == id).cloned()),
                property: receipt
                    .property_id
                    .and_then(|id| properties.iter().find(|p| p.id == id).cloned()),
            })
            .collect())
    }

    async fn save_receipt(&self, data: NewReceipt) -> Result<Receipt, sqlx::Error> {
        if self.fail_receipt_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }

        let receipt = Receipt {
            id: Uuid::new_v4(),
            client_id: Some(data.client_id),
            property_id: Some(data.property_id),
            amount: data.amount,
            receipt_number: data.receipt_number,
            receipt_url: data.receipt_url,
            issued_at: data.issued_at,
            created_at: Utc::now(),
        };
        self.receipts.lock().await.push(receipt.clone());
        Ok(receipt)
    }

    async fn delete_receipt(&self, receipt_id: Uuid) -> Result<(), sqlx::Error> {
        let mut receipts = self.receipts.lock().await;
        let before = receipts.len();
        receipts.retain(|r| r.id != receipt_id);
        if receipts.len() == before {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StoredUpload {
    pub bucket: String,
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    pub uploads: Mutex<Vec<StoredUpload>>,
    pub fail_uploads: AtomicBool,
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                status: 500,
            });
        }

        self.uploads.lock().await.push(StoredUpload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });
        Ok(StoredObject {
            key: key.to_string(),
            public_url: format!("http://storage.local/object/public/{}/{}", bucket, key),
        })
    }
}

pub(crate) fn client_named(name: &str, email: &str) -> Client {
    Client {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "+1 555 0100".to_string(),
        documents: None,
        purchase_history: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn property_named(name: &str, category: PropertyCategory, price: f64) -> Property {
    Property {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        location: Some("Lekki Phase 1".to_string()),
        price,
        description: None,
        short_description: None,
        images: None,
        virtual_tour_url: None,
        is_featured: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
