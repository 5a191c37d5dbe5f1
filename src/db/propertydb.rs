use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::propertydtos::{SavePropertyDto, UpdatePropertyDto},
    models::propertymodel::{Property, PropertyCategory},
};

/// Number of properties the featured strip on the landing page shows.
pub const FEATURED_LIMIT: i64 = 6;

#[async_trait]
pub trait PropertyExt {
    async fn get_properties(&self) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_featured_properties(&self) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn get_property_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_property(&self, data: SavePropertyDto) -> Result<Property, sqlx::Error>;

    async fn update_property(
        &self,
        property_id: Uuid,
        data: UpdatePropertyDto,
    ) -> Result<Property, sqlx::Error>;

    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn get_properties(&self) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, category, location, price, description, short_description,
                   images, virtual_tour_url, is_featured, created_at, updated_at
            FROM properties
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_featured_properties(&self) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, category, location, price, description, short_description,
                   images, virtual_tour_url, is_featured, created_at, updated_at
            FROM properties
            WHERE is_featured = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(FEATURED_LIMIT)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, category, location, price, description, short_description,
                   images, virtual_tour_url, is_featured, created_at, updated_at
            FROM properties
            WHERE id = $1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_property_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM properties"#)
            .fetch_one(&self.pool)
            .await
    }

    async fn save_property(&self, data: SavePropertyDto) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties
                (name, category, location, price, description, short_description,
                 images, virtual_tour_url, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, category, location, price, description, short_description,
                      images, virtual_tour_url, is_featured, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.category)
        .bind(data.location)
        .bind(data.price)
        .bind(data.description)
        .bind(data.short_description)
        .bind(data.images.map(Json))
        .bind(data.virtual_tour_url)
        .bind(data.is_featured.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
    }

    async fn update_property(
        &self,
        property_id: Uuid,
        data: UpdatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                location = COALESCE($4, location),
                price = COALESCE($5, price),
                description = COALESCE($6, description),
                short_description = COALESCE($7, short_description),
                images = COALESCE($8, images),
                virtual_tour_url = COALESCE($9, virtual_tour_url),
                is_featured = COALESCE($10, is_featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, category, location, price, description, short_description,
                      images, virtual_tour_url, is_featured, created_at, updated_at
            "#,
        )
        .bind(property_id)
        .bind(data.name)
        .bind(data.category)
        .bind(data.location)
        .bind(data.price)
        .bind(data.description)
        .bind(data.short_description)
        .bind(data.images.map(Json))
        .bind(data.virtual_tour_url)
        .bind(data.is_featured)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM properties WHERE id = $1"#)
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

/// Builds the property side of a LEFT JOIN row where every column is
/// aliased with a `p_` prefix. A NULL `p_id` means the reference dangles.
pub(crate) fn property_from_joined_row(row: &PgRow) -> Result<Option<Property>, sqlx::Error> {
    let property_id = row.try_get::<Option<Uuid>, _>("p_id")?;
    match property_id {
        Some(id) => Ok(Some(Property {
            id,
            name: row.try_get("p_name")?,
            category: row.try_get::<PropertyCategory, _>("p_category")?,
            location: row.try_get("p_location")?,
            price: row.try_get("p_price")?,
            description: row.try_get("p_description")?,
            short_description: row.try_get("p_short_description")?,
            images: row.try_get("p_images")?,
            virtual_tour_url: row.try_get("p_virtual_tour_url")?,
            is_featured: row.try_get("p_is_featured")?,
            created_at: row.try_get("p_created_at")?,
            updated_at: row.try_get("p_updated_at")?,
        })),
        None => Ok(None),
    }
}
