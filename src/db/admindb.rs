use async_trait::async_trait;
use uuid::Uuid;

use crate::{db::db::DBClient, models::adminmodel::AdminUser};

#[async_trait]
pub trait AdminExt {
    async fn get_admin_user(
        &self,
        admin_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<AdminUser>, sqlx::Error>;

    async fn save_admin_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AdminUser, sqlx::Error>;
}

#[async_trait]
impl AdminExt for DBClient {
    async fn get_admin_user(
        &self,
        admin_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        if let Some(admin_id) = admin_id {
            sqlx::query_as::<_, AdminUser>(
                r#"
                SELECT id, name, email, password, created_at, updated_at
                FROM admin_users
                WHERE id = $1
                "#,
            )
            .bind(admin_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(email) = email {
            sqlx::query_as::<_, AdminUser>(
                r#"
                SELECT id, name, email, password, created_at, updated_at
                FROM admin_users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
        } else {
            Ok(None)
        }
    }

    async fn save_admin_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AdminUser, sqlx::Error> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }
}
