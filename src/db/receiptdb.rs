use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    db::clientdb::client_from_joined_row,
    db::db::DBClient,
    db::propertydb::property_from_joined_row,
    models::receiptmodel::{Receipt, ReceiptWithRelations},
};

/// Row to persist after the document has been rendered and uploaded.
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub client_id: Uuid,
    pub property_id: Uuid,
    pub amount: f64,
    pub receipt_number: String,
    pub receipt_url: String,
    pub issued_at: NaiveDate,
}

#[async_trait]
pub trait ReceiptExt {
    async fn get_receipts(&self) -> Result<Vec<ReceiptWithRelations>, sqlx::Error>;

    async fn save_receipt(&self, data: NewReceipt) -> Result<Receipt, sqlx::Error>;

    async fn delete_receipt(&self, receipt_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ReceiptExt for DBClient {
    async fn get_receipts(&self) -> Result<Vec<ReceiptWithRelations>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                r.id, r.client_id, r.property_id, r.amount, r.receipt_number,
                r.receipt_url, r.issued_at, r.created_at,
                c.id AS c_id, c.name AS c_name, c.email AS c_email, c.phone AS c_phone,
                c.documents AS c_documents, c.purchase_history AS c_purchase_history,
                c.notes AS c_notes, c.created_at AS c_created_at, c.updated_at AS c_updated_at,
                p.id AS p_id, p.name AS p_name, p.category AS p_category,
                p.location AS p_location, p.price AS p_price, p.description AS p_description,
                p.short_description AS p_short_description, p.images AS p_images,
                p.virtual_tour_url AS p_virtual_tour_url, p.is_featured AS p_is_featured,
                p.created_at AS p_created_at, p.updated_at AS p_updated_at
            FROM receipts r
            LEFT JOIN clients c ON c.id = r.client_id
            LEFT JOIN properties p ON p.id = r.property_id
            ORDER BY r.issued_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut receipts = Vec::with_capacity(rows.len());
        for row in &rows {
            receipts.push(ReceiptWithRelations {
                receipt: Receipt::from_row(row)?,
                client: client_from_joined_row(row)?,
                property: property_from_joined_row(row)?,
            });
        }
        Ok(receipts)
    }

    async fn save_receipt(&self, data: NewReceipt) -> Result<Receipt, sqlx::Error> {
        sqlx::query_as::<_, Receipt>(
            r#"
            INSERT INTO receipts (client_id, property_id, amount, receipt_number,
                                  receipt_url, issued_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, client_id, property_id, amount, receipt_number,
                      receipt_url, issued_at, created_at
            "#,
        )
        .bind(data.client_id)
        .bind(data.property_id)
        .bind(data.amount)
        .bind(data.receipt_number)
        .bind(data.receipt_url)
        .bind(data.issued_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_receipt(&self, receipt_id: Uuid) -> Result<(), sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM receipts WHERE id = $1"#)
            .bind(receipt_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}
