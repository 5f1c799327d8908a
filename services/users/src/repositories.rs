//! Repositories for database operations

use async_trait::async_trait;
use common::database::ConnectionSource;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{Connection, PgConnection, Row};
use tracing::debug;

use crate::models::{NameChange, NewUser, User};

pub mod memory;

/// Storage port for users, keyed by email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and commit
    async fn insert(&self, user: &NewUser) -> DatabaseResult<()>;

    /// Find a user by exact email match
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// Set first and last name and commit; returns the number of rows changed
    ///
    /// A row whose names already equal the requested ones is not counted.
    async fn update_names(&self, email: &str, change: &NameChange) -> DatabaseResult<u64>;

    /// Delete by email and commit; returns the number of rows removed
    async fn delete_by_email(&self, email: &str) -> DatabaseResult<u64>;
}

/// PostgreSQL user store
///
/// Each operation acquires its own connection from the source and releases
/// it before returning, whatever the outcome.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    source: ConnectionSource,
}

impl PgUserStore {
    /// Create a new user store
    pub fn new(source: ConnectionSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &ConnectionSource {
        &self.source
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &NewUser) -> DatabaseResult<()> {
        debug!("Inserting user: {}", user.email);

        let mut conn = self.source.acquire().await?;
        let result = insert_user(conn.connection(), user).await;
        conn.release().await;
        result
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let mut conn = self.source.acquire().await?;
        let result = select_user(conn.connection(), email).await;
        conn.release().await;
        result
    }

    async fn update_names(&self, email: &str, change: &NameChange) -> DatabaseResult<u64> {
        debug!("Updating user: {}", email);

        let mut conn = self.source.acquire().await?;
        let result = update_user(conn.connection(), email, change).await;
        conn.release().await;
        result
    }

    async fn delete_by_email(&self, email: &str) -> DatabaseResult<u64> {
        debug!("Deleting user: {}", email);

        let mut conn = self.source.acquire().await?;
        let result = delete_user(conn.connection(), email).await;
        conn.release().await;
        result
    }
}

async fn insert_user(conn: &mut PgConnection, user: &NewUser) -> DatabaseResult<()> {
    let mut tx = conn.begin().await.map_err(DatabaseError::Query)?;

    sqlx::query(
        r#"
        INSERT INTO users (email, first_name, last_name, password_hash)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.password_hash)
    .execute(&mut *tx)
    .await
    .map_err(DatabaseError::Query)?;

    tx.commit().await.map_err(DatabaseError::Query)
}

async fn select_user(conn: &mut PgConnection, email: &str) -> DatabaseResult<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, email, first_name, last_name
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await
    .map_err(DatabaseError::Query)?;

    match row {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

async fn update_user(
    conn: &mut PgConnection,
    email: &str,
    change: &NameChange,
) -> DatabaseResult<u64> {
    let mut tx = conn.begin().await.map_err(DatabaseError::Query)?;

    // Unchanged rows are excluded so the count reflects actual changes.
    let result = sqlx::query(
        r#"
        UPDATE users
        SET first_name = $1, last_name = $2
        WHERE email = $3
          AND (first_name IS DISTINCT FROM $1 OR last_name IS DISTINCT FROM $2)
        "#,
    )
    .bind(&change.first_name)
    .bind(&change.last_name)
    .bind(email)
    .execute(&mut *tx)
    .await
    .map_err(DatabaseError::Query)?;

    tx.commit().await.map_err(DatabaseError::Query)?;
    Ok(result.rows_affected())
}

async fn delete_user(conn: &mut PgConnection, email: &str) -> DatabaseResult<u64> {
    let mut tx = conn.begin().await.map_err(DatabaseError::Query)?;

    let result = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::Query)?;

    tx.commit().await.map_err(DatabaseError::Query)?;
    Ok(result.rows_affected())
}

fn row_to_user(row: &PgRow) -> DatabaseResult<User> {
    Ok(User {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        email: row.try_get("email").map_err(DatabaseError::Query)?,
        first_name: row.try_get("first_name").map_err(DatabaseError::Query)?,
        last_name: row.try_get("last_name").map_err(DatabaseError::Query)?,
    })
}
