use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    db::propertydb::property_from_joined_row,
    dtos::tourdtos::{SaveVirtualTourDto, UpdateVirtualTourDto},
    models::tourmodel::{VirtualTour, VirtualTourWithProperty},
};

#[async_trait]
pub trait VirtualTourExt {
    async fn get_virtual_tours(&self) -> Result<Vec<VirtualTourWithProperty>, sqlx::Error>;

    async fn get_virtual_tour_by_id(
        &self,
        tour_id: Uuid,
    ) -> Result<Option<VirtualTour>, sqlx::Error>;

    async fn get_virtual_tour_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_virtual_tour(
        &self,
        data: SaveVirtualTourDto,
    ) -> Result<VirtualTour, sqlx::Error>;

    async fn update_virtual_tour(
        &self,
        tour_id: Uuid,
        data: UpdateVirtualTourDto,
    ) -> Result<VirtualTour, sqlx::Error>;

    /// Point the tour at an uploaded asset. Overwrites any previous path.
    async fn set_tour_asset(
        &self,
        tour_id: Uuid,
        asset_path: String,
    ) -> Result<VirtualTour, sqlx::Error>;

    async fn delete_virtual_tour(&self, tour_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl VirtualTourExt for DBClient {
    async fn get_virtual_tours(&self) -> Result<Vec<VirtualTourWithProperty>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                t.id, t.property_id, t.title, t.tour_url, t.asset_path,
                t.created_at, t.updated_at,
                p.id AS p_id, p.name AS p_name, p.category AS p_category,
                p.location AS p_location, p.price AS p_price, p.description AS p_description,
                p.short_description AS p_short_description, p.images AS p_images,
                p.virtual_tour_url AS p_virtual_tour_url, p.is_featured AS p_is_featured,
                p.created_at AS p_created_at, p.updated_at AS p_updated_at
            FROM virtual_tours t
            LEFT JOIN properties p ON p.id = t.property_id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tours = Vec::with_capacity(rows.len());
        for row in &rows {
            tours.push(VirtualTourWithProperty {
                tour: VirtualTour::from_row(row)?,
                property: property_from_joined_row(row)?,
            });
        }
        Ok(tours)
    }

    async fn get_virtual_tour_by_id(
        &self,
        tour_id: Uuid,
    ) -> Result<Option<VirtualTour>, sqlx::Error> {
        sqlx::query_as::<_, VirtualTour>(
            r#"
            SELECT id, property_id, title, tour_url, asset_path, created_at, updated_at
            FROM virtual_tours
            WHERE id = $1
            "#,
        )
        .bind(tour_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_virtual_tour_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM virtual_tours"#)
            .fetch_one(&self.pool)
            .await
    }

    async fn save_virtual_tour(
        &self,
        data: SaveVirtualTourDto,
    ) -> Result<VirtualTour, sqlx::Error> {
        sqlx::query_as::<_, VirtualTour>(
            r#"
            INSERT INTO virtual_tours (property_id, title, tour_url)
            VALUES ($1, $2, $3)
            RETURNING id, property_id, title, tour_url, asset_path, created_at, updated_at
            "#,
        )
        .bind(data.property_id)
        .bind(data.title)
        .bind(data.tour_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_virtual_tour(
        &self,
        tour_id: Uuid,
        data: UpdateVirtualTourDto,
    ) -> Result<VirtualTour, sqlx::Error> {
        sqlx::query_as::<_, VirtualTour>(
            r#"
            UPDATE virtual_tours
            SET property_id = COALESCE($2, property_id),
                title = COALESCE($3, title),
                tour_url = COALESCE($4, tour_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, property_id, title, tour_url, asset_path, created_at, updated_at
            "#,
        )
        .bind(tour_id)
        .bind(data.property_id)
        .bind(data.title)
        .bind(data.tour_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_tour_asset(
        &self,
        tour_id: Uuid,
        asset_path: String,
    ) -> Result<VirtualTour, sqlx::Error> {
        sqlx::query_as::<_, VirtualTour>(
            r#"
            UPDATE virtual_tours
            SET asset_path = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, property_id, title, tour_url, asset_path, created_at, updated_at
            "#,
        )
        .bind(tour_id)
        .bind(asset_path)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_virtual_tour(&self, tour_id: Uuid) -> Result<(), sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM virtual_tours WHERE id = $1"#)
            .bind(tour_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}
