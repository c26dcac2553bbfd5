//! Credential store: persistence for users and their entries.
//!
//! Handlers and the auth gate only see [`CredentialStore`]; the backend is
//! picked once at startup and shared through `AppState`.

use async_trait::async_trait;

use crate::{auth::repo_types::User, entries::repo_types::Entry};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error("user {0} does not exist")]
    UnknownOwner(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a user, failing with [`StoreError::DuplicateUsername`] if the
    /// name is taken. The check and the insert are a single atomic step.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn create_entry(&self, user_id: i64, content: &str) -> Result<Entry, StoreError>;

    /// All live (not soft-deleted) entries owned by `user_id`, oldest first.
    async fn list_entries_by_user(&self, user_id: i64) -> Result<Vec<Entry>, StoreError>;
}
