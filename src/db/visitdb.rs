use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    db::clientdb::client_from_joined_row,
    db::db::DBClient,
    db::propertydb::property_from_joined_row,
    dtos::visitdtos::UpdateSiteVisitDto,
    models::visitmodel::{SiteVisit, SiteVisitWithRelations, VisitStatus},
};

#[async_trait]
pub trait SiteVisitExt {
    /// Schedule view: every visit with its client and property expanded,
    /// soonest first.
    async fn get_site_visits(&self) -> Result<Vec<SiteVisitWithRelations>, sqlx::Error>;

    async fn get_upcoming_visit_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_site_visit(
        &self,
        client_id: Uuid,
        property_id: Uuid,
        scheduled_date: DateTime<Utc>,
        status: VisitStatus,
        notes: Option<String>,
    ) -> Result<SiteVisit, sqlx::Error>;

    async fn update_site_visit(
        &self,
        visit_id: Uuid,
        data: UpdateSiteVisitDto,
    ) -> Result<SiteVisit, sqlx::Error>;

    async fn delete_site_visit(&self, visit_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SiteVisitExt for DBClient {
    async fn get_site_visits(&self) -> Result<Vec<SiteVisitWithRelations>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id, v.client_id, v.property_id, v.scheduled_date, v.status, v.notes,
                v.created_at, v.updated_at,
                c.id AS c_id, c.name AS c_name, c.email AS c_email, c.phone AS c_phone,
                c.documents AS c_documents, c.purchase_history AS c_purchase_history,
                c.notes AS c_notes, c.created_at AS c_created_at, c.updated_at AS c_updated_at,
                p.id AS p_id, p.name AS p_name, p.category AS p_category,
                p.location AS p_location, p.price AS p_price, p.description AS p_description,
                p.short_description AS p_short_description, p.images AS p_images,
                p.virtual_tour_url AS p_virtual_tour_url, p.is_featured AS p_is_featured,
                p.created_at AS p_created_at, p.updated_at AS p_updated_at
            FROM site_visits v
            LEFT JOIN clients c ON c.id = v.client_id
            LEFT JOIN properties p ON p.id = v.property_id
            ORDER BY v.scheduled_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut visits = Vec::with_capacity(rows.len());
        for row in &rows {
            visits.push(SiteVisitWithRelations {
                visit: SiteVisit::from_row(row)?,
                client: client_from_joined_row(row)?,
                property: property_from_joined_row(row)?,
            });
        }
        Ok(visits)
    }

    async fn get_upcoming_visit_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM site_visits WHERE status = 'upcoming'::visit_status"#,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn save_site_visit(
        &self,
        client_id: Uuid,
        property_id: Uuid,
        scheduled_date: DateTime<Utc>,
        status: VisitStatus,
        notes: Option<String>,
    ) -> Result<SiteVisit, sqlx::Error> {
        sqlx::query_as::<_, SiteVisit>(
            r#"
            INSERT INTO site_visits (client_id, property_id, scheduled_date, status, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, property_id, scheduled_date, status, notes,
                      created_at, updated_at
            "#,
        )
        .bind(client_id)
        .bind(property_id)
        .bind(scheduled_date)
        .bind(status)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_site_visit(
        &self,
        visit_id: Uuid,
        data: UpdateSiteVisitDto,
    ) -> Result<SiteVisit, sqlx::Error> {
        sqlx::query_as::<_, SiteVisit>(
            r#"
            UPDATE site_visits
            SET client_id = COALESCE($2, client_id),
                property_id = COALESCE($3, property_id),
                scheduled_date = COALESCE($4, scheduled_date),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, client_id, property_id, scheduled_date, status, notes,
                      created_at, updated_at
            "#,
        )
        .bind(visit_id)
        .bind(data.client_id)
        .bind(data.property_id)
        .bind(data.scheduled_date)
        .bind(data.status)
        .bind(data.notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_site_visit(&self, visit_id: Uuid) -> Result<(), sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM site_visits WHERE id = $1"#)
            .bind(visit_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}
