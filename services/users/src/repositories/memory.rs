//! In-memory user store implementation

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::UserStore;
use crate::models::{NameChange, NewUser, User};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: HashMap<String, StoredUser>,
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// In-memory implementation of [`UserStore`] with the same unique-email
/// and change-counting rules as the PostgreSQL table
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stored password hash for `email`
    pub async fn password_hash(&self, email: &str) -> Option<String> {
        let table = self.table.read().await;
        table.rows.get(email).map(|stored| stored.password_hash.clone())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &NewUser) -> DatabaseResult<()> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(&user.email) {
            return Err(DatabaseError::Query(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint \"users_email_key\": {}",
                user.email
            ))));
        }

        table.next_id += 1;
        let stored = StoredUser {
            user: User {
                id: table.next_id,
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            password_hash: user.password_hash.clone(),
        };
        table.rows.insert(user.email.clone(), stored);

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(email).map(|stored| stored.user.clone()))
    }

    async fn update_names(&self, email: &str, change: &NameChange) -> DatabaseResult<u64> {
        let mut table = self.table.write().await;

        match table.rows.get_mut(email) {
            Some(stored)
                if stored.user.first_name != change.first_name
                    || stored.user.last_name != change.last_name =>
            {
                stored.user.first_name = change.first_name.clone();
                stored.user.last_name = change.last_name.clone();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_by_email(&self, email: &str) -> DatabaseResult<u64> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(email).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password_hash: "hashedpassword123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        store.insert(&new_user("test@example.com")).await.unwrap();

        let user = store.find_by_email("test@example.com").await.unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.first_name, "John");
        assert_eq!(
            store.password_hash("test@example.com").await.as_deref(),
            Some("hashedpassword123")
        );

        assert!(store.find_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(&new_user("test@example.com")).await.unwrap();

        let err = store.insert(&new_user("test@example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Query(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_counts_only_changes() {
        let store = InMemoryUserStore::new();
        store.insert(&new_user("test@example.com")).await.unwrap();

        let same = NameChange {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        };
        assert_eq!(store.update_names("test@example.com", &same).await.unwrap(), 0);

        let change = NameChange {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
        };
        assert_eq!(store.update_names("test@example.com", &change).await.unwrap(), 1);
        assert_eq!(store.update_names("nobody@example.com", &change).await.unwrap(), 0);

        let user = store.find_by_email("test@example.com").await.unwrap().unwrap();
        assert_eq!(user.last_name, "Smith");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryUserStore::new();
        store.insert(&new_user("test@example.com")).await.unwrap();

        assert_eq!(store.delete_by_email("test@example.com").await.unwrap(), 1);
        assert_eq!(store.delete_by_email("test@example.com").await.unwrap(), 0);
        assert!(store.is_empty().await);
    }
}
