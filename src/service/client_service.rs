use std::sync::Arc;

use crate::{
    db::clientdb::ClientExt,
    dtos::clientdtos::{SaveClientDto, UpdateClientDto},
    models::clientmodel::Client,
    service::error::ServiceError,
};

/// Contact fields shared by every public capture form.
#[derive(Debug, Clone)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Context for the CRM record. When present it replaces the stored notes;
    /// when absent the stored notes are left alone.
    pub notes: Option<String>,
}

/// Find-or-create keyed on the exact email string.
///
/// Lookup is case sensitive and performs no trimming. Two submissions racing
/// on a new email can both insert; the table carries no unique constraint, so
/// the duplicate simply becomes a second CRM record.
#[derive(Debug, Clone)]
pub struct ClientService<S> {
    db_client: Arc<S>,
}

impl<S> ClientService<S>
where
    S: ClientExt + Send + Sync,
{
    pub fn new(db_client: Arc<S>) -> Self {
        Self { db_client }
    }

    /// Resolves contact fields to a client row with at most one write.
    pub async fn resolve(&self, contact: ClientContact) -> Result<Client, ServiceError> {
        let existing = self.db_client.get_client_by_email(&contact.email).await?;

        let client = match existing {
            Some(found) => {
                let updated = self
                    .db_client
                    .update_client(
                        found.id,
                        UpdateClientDto {
                            name: Some(contact.name),
                            email: Some(contact.email),
                            phone: Some(contact.phone),
                            purchase_history: None,
                            notes: contact.notes,
                        },
                    )
                    .await?;
                tracing::debug!("Refreshed existing client {}", updated.id);
                updated
            }
            None => {
                let created = self
                    .db_client
                    .save_client(SaveClientDto {
                        name: contact.name,
                        email: contact.email,
                        phone: contact.phone,
                        purchase_history: None,
                        notes: contact.notes,
                    })
                    .await?;
                tracing::debug!("Captured new client {}", created.id);
                created
            }
        };

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::service::test_support::{client_named, MemoryDb};

    fn contact(name: &str, email: &str, notes: Option<&str>) -> ClientContact {
        ClientContact {
            name: name.to_string(),
            email: email.to_string(),
            phone: "+234 801 555 0199".to_string(),
            notes: notes.map(String::from),
        }
    }

    #[tokio::test]
    async fn unknown_email_creates_a_client() {
        let db = Arc::new(MemoryDb::default());
        let service = ClientService::new(db.clone());

        let client = service
            .resolve(contact("Ada Obi", "ada@example.com", Some("Asked about plots")))
            .await
            .unwrap();

        assert_eq!(client.name, "Ada Obi");
        assert_eq!(client.email, "ada@example.com");
        assert_eq!(client.notes.as_deref(), Some("Asked about plots"));
        assert_eq!(db.client_inserts.load(Ordering::SeqCst), 1);
        assert_eq!(db.client_updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn known_email_updates_the_same_row() {
        let db = Arc::new(MemoryDb::default());
        let mut existing = client_named("Ada", "ada@example.com");
        existing.notes = Some("First visit booked".to_string());
        let existing_id = existing.id;
        db.seed_client(existing).await;

        let service = ClientService::new(db.clone());
        let client = service
            .resolve(contact("Ada Obi", "ada@example.com", None))
            .await
            .unwrap();

        assert_eq!(client.id, existing_id);
        assert_eq!(client.name, "Ada Obi");
        assert_eq!(client.phone, "+234 801 555 0199");
        // Absent notes leave the stored notes alone.
        assert_eq!(client.notes.as_deref(), Some("First visit booked"));
        assert_eq!(db.client_inserts.load(Ordering::SeqCst), 0);
        assert_eq!(db.client_updates.load(Ordering::SeqCst), 1);
        assert_eq!(db.clients.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn present_notes_replace_stored_notes() {
        let db = Arc::new(MemoryDb::default());
        let mut existing = client_named("Ada", "ada@example.com");
        existing.notes = Some("Old context".to_string());
        db.seed_client(existing).await;

        let service = ClientService::new(db.clone());
        let client = service
            .resolve(contact("Ada", "ada@example.com", Some("Now wants a duplex")))
            .await
            .unwrap();

        assert_eq!(client.notes.as_deref(), Some("Now wants a duplex"));
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let db = Arc::new(MemoryDb::default());
        db.seed_client(client_named("Ada", "Ada@Example.com")).await;

        let service = ClientService::new(db.clone());
        service
            .resolve(contact("Ada", "ada@example.com", None))
            .await
            .unwrap();

        // Different byte string, different record.
        assert_eq!(db.clients.lock().await.len(), 2);
        assert_eq!(db.client_inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let db = Arc::new(MemoryDb::default());
        db.fail_client_writes.store(true, Ordering::SeqCst);

        let service = ClientService::new(db);
        let result = service.resolve(contact("Ada", "ada@example.com", None)).await;

        assert!(matches!(result, Err(ServiceError::Database(_))));
    }
}
