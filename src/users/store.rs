//! Storage collaborator for users.
//!
//! Handlers only see the [`UserStore`] trait. [`SqlUserStore`] is the
//! relational implementation, a thin layer over one long-lived `sqlx` pool
//! created at startup and shared by every request.

use std::fmt;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use super::model::User;

/// A storage failure.
#[derive(Debug)]
pub enum StoreError {
    /// No row matched the lookup.
    NotFound,
    /// Connection, query or row-decoding failure.
    Backend(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound   => f.write_str("no matching user"),
            Self::Backend(e) => write!(f, "database: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound   => None,
            Self::Backend(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Backend(other),
        }
    }
}

/// Insert and query users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
    async fn query_all(&self) -> Result<Vec<User>, StoreError>;
    async fn query_by_id(&self, id: &str) -> Result<User, StoreError>;
}

/// [`UserStore`] backed by the `users` table.
#[derive(Clone)]
pub struct SqlUserStore {
    pool: SqlitePool,
}

impl SqlUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool of at most `max_connections` connections to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `users` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id    TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                name  TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool { &self.pool }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users (id, email, name) VALUES (?, ?, ?)")
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn query_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT id, email, name FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn query_by_id(&self, id: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }
}
