//! In-process document store with optional snapshot persistence.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::store::user::{NewUser, User};
use crate::store::{StoreError, UserStore};

/// A thread-safe user document store backed by a concurrent map.
///
/// When a persistence path is configured, every mutation writes a full JSON
/// snapshot of the documents; a snapshot write failure is reported to the
/// caller so partially-linked state is never silently dropped.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, User>>,
    persistence_path: Option<String>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load documents from a snapshot file if it exists.
    pub fn load_from_file(path: &str) -> Result<Self, StoreError> {
        let store = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let users: Vec<User> = serde_json::from_reader(reader)?;

            for user in users {
                store.inner.insert(user.id.clone(), user);
            }
            tracing::info!(count = store.inner.len(), path = %path, "Loaded user documents from snapshot");
        }
        Ok(store)
    }

    /// Write a snapshot if persistence is configured.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.persistence_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);

            let users: Vec<User> = self.inner.iter().map(|r| r.value().clone()).collect();
            serde_json::to_writer(writer, &users)?;
            tracing::debug!(count = users.len(), "Saved user document snapshot");
        }
        Ok(())
    }

    /// Number of stored documents.
    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.iter().map(|r| r.value().clone()).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.get(id).map(|r| r.value().clone()))
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4().simple().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            orders: user.orders,
        };
        self.inner.insert(user.id.clone(), user.clone());
        self.save()?;
        Ok(user)
    }

    async fn append_order(&self, id: &str, order_id: &str) -> Result<Option<()>, StoreError> {
        match self.inner.get_mut(id) {
            Some(mut entry) => {
                entry.orders.push(order_id.to_string());
            }
            None => return Ok(None),
        }
        // The entry guard is dropped before saving; save() iterates the map.
        self.save()?;
        Ok(Some(()))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, StoreError> {
        let removed = self.inner.remove(id).map(|(_, user)| user);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            address: "1 Test St".to_string(),
            orders: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new(None);

        let user = store.insert(new_user("a@example.com")).await.unwrap();
        assert_eq!(user.id.len(), 32);

        let found = store.find(&user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@example.com");
        assert!(store.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_order() {
        let store = MemoryStore::new(None);
        let user = store.insert(new_user("b@example.com")).await.unwrap();

        assert!(store.append_order(&user.id, "o1").await.unwrap().is_some());
        assert!(store.append_order(&user.id, "o2").await.unwrap().is_some());

        let found = store.find(&user.id).await.unwrap().unwrap();
        assert_eq!(found.orders, vec!["o1", "o2"]);

        // Appending to an unknown user reports the miss instead of creating one.
        assert!(store.append_order("missing", "o3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new(None);
        let user = store.insert(new_user("c@example.com")).await.unwrap();

        let removed = store.delete(&user.id).await.unwrap().unwrap();
        assert_eq!(removed.email, "c@example.com");
        assert!(store.delete(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_persistence() {
        let path = "test_users_persistence.json";

        let store = MemoryStore::new(Some(path.to_string()));
        let user = store.insert(new_user("d@example.com")).await.unwrap();
        store.append_order(&user.id, "o1").await.unwrap();

        let loaded = MemoryStore::load_from_file(path).unwrap();
        let found = loaded.find(&user.id).await.unwrap().unwrap();
        assert_eq!(found.orders, vec!["o1"]);

        std::fs::remove_file(path).unwrap_or_default();
    }
}
