use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::{CredentialStore, StoreError};
use crate::{auth::repo_types::User, entries::repo_types::Entry};

/// Process-local store. Used by tests and when no `DATABASE_URL` is configured.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all users.
    pub async fn entry_count(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut t = self.inner.lock().await;
        if t.users.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername);
        }
        let user = User {
            id: t.users.len() as i64 + 1,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_entry(&self, user_id: i64, content: &str) -> Result<Entry, StoreError> {
        let mut t = self.inner.lock().await;
        if !t.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::UnknownOwner(user_id));
        }
        let now = OffsetDateTime::now_utc();
        let entry = Entry {
            id: t.entries.len() as i64 + 1,
            user_id,
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        t.entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_entries_by_user(&self, user_id: i64) -> Result<Vec<Entry>, StoreError> {
        let t = self.inner.lock().await;
        Ok(t.entries
            .iter()
            .filter(|e| e.user_id == user_id && e.deleted_at.is_none())
            .cloned()
            .collect())
    }
}
