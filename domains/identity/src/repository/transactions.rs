//! Transactional free functions for the identity domain (Zero2Prod pattern)

use crate::domain::entities::{Organisation, User};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a user within an existing transaction.
pub async fn insert_user_tx(
    transaction: &mut Transaction<'_, Postgres>,
    user: &User,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, first_name, last_name, email, phone, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .execute(&mut **transaction)
    .await?;
    Ok(())
}

/// Insert an organisation within an existing transaction.
pub async fn insert_organisation_tx(
    transaction: &mut Transaction<'_, Postgres>,
    organisation: &Organisation,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO organisations (id, name, description, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(organisation.id)
    .bind(&organisation.name)
    .bind(&organisation.description)
    .bind(organisation.created_at)
    .execute(&mut **transaction)
    .await?;
    Ok(())
}

/// Add a membership within an existing transaction.
///
/// Returns `false` when the membership already existed.
pub async fn add_member_tx(
    transaction: &mut Transaction<'_, Postgres>,
    organisation_id: Uuid,
    user_id: Uuid,
) -> std::result::Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO organisation_members (organisation_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (organisation_id, user_id) DO NOTHING
        "#,
    )
    .bind(organisation_id)
    .bind(user_id)
    .execute(&mut **transaction)
    .await?;
    Ok(result.rows_affected() > 0)
}
