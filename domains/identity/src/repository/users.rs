//! User repository

use async_trait::async_trait;
use orgauth_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::transactions::{add_member_tx, insert_organisation_tx, insert_user_tx};
use super::{RepositoryResult, UserStore};
use crate::domain::entities::{Organisation, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_with_default_organisation(
        &self,
        user: &User,
        organisation: &Organisation,
    ) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        insert_user_tx(&mut tx, user)
            .await
            .map_err(RepositoryError::from_write)?;
        insert_organisation_tx(&mut tx, organisation)
            .await
            .map_err(RepositoryError::from_write)?;
        add_member_tx(&mut tx, organisation.id, user.id).await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user.id,
            organisation_id = %organisation.id,
            "User registered with default organisation"
        );
        Ok(())
    }
}
