//! Organisation and membership repository

use async_trait::async_trait;
use orgauth_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::transactions::{add_member_tx, insert_organisation_tx};
use super::{OrganisationStore, RepositoryResult};
use crate::domain::entities::Organisation;

#[derive(Clone)]
pub struct OrganisationRepository {
    pool: PgPool,
}

impl OrganisationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganisationStore for OrganisationRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Organisation>> {
        let organisation: Option<Organisation> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at
            FROM organisations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organisation)
    }

    async fn create_with_member(
        &self,
        organisation: &Organisation,
        creator: Uuid,
    ) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        insert_organisation_tx(&mut tx, organisation)
            .await
            .map_err(RepositoryError::from_write)?;
        add_member_tx(&mut tx, organisation.id, creator).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn add_member(&self, organisation_id: Uuid, user_id: Uuid) -> RepositoryResult<bool> {
        let mut tx = self.pool.begin().await?;
        let inserted = add_member_tx(&mut tx, organisation_id, user_id).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    async fn is_member(&self, organisation_id: Uuid, user_id: Uuid) -> RepositoryResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM organisation_members
                WHERE organisation_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(organisation_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn members_of(&self, organisation_id: Uuid) -> RepositoryResult<Vec<Uuid>> {
        let members: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM organisation_members
            WHERE organisation_id = $1
            ORDER BY joined_at ASC, user_id ASC
            "#,
        )
        .bind(organisation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn organisations_of(&self, user_id: Uuid) -> RepositoryResult<Vec<Organisation>> {
        let organisations: Vec<Organisation> = sqlx::query_as(
            r#"
            SELECT o.id, o.name, o.description, o.created_at
            FROM organisations o
            INNER JOIN organisation_members m ON o.id = m.organisation_id
            WHERE m.user_id = $1
            ORDER BY o.name ASC, o.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(organisations)
    }

    async fn share_organisation(&self, a: Uuid, b: Uuid) -> RepositoryResult<bool> {
        let shared: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM organisation_members ma
                INNER JOIN organisation_members mb
                    ON ma.organisation_id = mb.organisation_id
                WHERE ma.user_id = $1 AND mb.user_id = $2
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        Ok(shared)
    }
}
