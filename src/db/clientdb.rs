use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::clientdtos::{SaveClientDto, UpdateClientDto},
    models::clientmodel::Client,
};

#[async_trait]
pub trait ClientExt {
    async fn get_clients(&self) -> Result<Vec<Client>, sqlx::Error>;

    async fn get_client_by_id(&self, client_id: Uuid) -> Result<Option<Client>, sqlx::Error>;

    /// Exact-string email lookup, the advisory dedup key for find-or-create.
    /// No trimming or case folding.
    async fn get_client_by_email(&self, email: &str) -> Result<Option<Client>, sqlx::Error>;

    async fn get_client_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_client(&self, data: SaveClientDto) -> Result<Client, sqlx::Error>;

    async fn update_client(
        &self,
        client_id: Uuid,
        data: UpdateClientDto,
    ) -> Result<Client, sqlx::Error>;

    async fn append_client_documents(
        &self,
        client_id: Uuid,
        document_urls: &[String],
    ) -> Result<Client, sqlx::Error>;

    async fn delete_client(&self, client_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ClientExt for DBClient {
    async fn get_clients(&self) -> Result<Vec<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, documents, purchase_history, notes,
                   created_at, updated_at
            FROM clients
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_client_by_id(&self, client_id: Uuid) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, documents, purchase_history, notes,
                   created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_client_by_email(&self, email: &str) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, documents, purchase_history, notes,
                   created_at, updated_at
            FROM clients
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_client_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM clients"#)
            .fetch_one(&self.pool)
            .await
    }

    async fn save_client(&self, data: SaveClientDto) -> Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, purchase_history, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, documents, purchase_history, notes,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.purchase_history)
        .bind(data.notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_client(
        &self,
        client_id: Uuid,
        data: UpdateClientDto,
    ) -> Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                purchase_history = COALESCE($5, purchase_history),
                notes = COALESCE($6, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, phone, documents, purchase_history, notes,
                      created_at, updated_at
            "#,
        )
        .bind(client_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.purchase_history)
        .bind(data.notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn append_client_documents(
        &self,
        client_id: Uuid,
        document_urls: &[String],
    ) -> Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET documents = COALESCE(documents, '[]'::jsonb) || $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, phone, documents, purchase_history, notes,
                      created_at, updated_at
            "#,
        )
        .bind(client_id)
        .bind(Json(document_urls))
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_client(&self, client_id: Uuid) -> Result<(), sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM clients WHERE id = $1"#)
            .bind(client_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

/// Builds the client side of a LEFT JOIN row where every column is
/// aliased with a `c_` prefix. A NULL `c_id` means the reference dangles.
pub(crate) fn client_from_joined_row(row: &PgRow) -> Result<Option<Client>, sqlx::Error> {
    let client_id = row.try_get::<Option<Uuid>, _>("c_id")?;
    match client_id {
        Some(id) => Ok(Some(Client {
            id,
            name: row.try_get("c_name")?,
            email: row.try_get("c_email")?,
            phone: row.try_get("c_phone")?,
            documents: row.try_get("c_documents")?,
            purchase_history: row.try_get("c_purchase_history")?,
            notes: row.try_get("c_notes")?,
            created_at: row.try_get("c_created_at")?,
            updated_at: row.try_get("c_updated_at")?,
        })),
        None => Ok(None),
    }
}
