use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::Credential;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::AuthError;

/// Process-local user directory.
///
/// Records live only as long as the process. Duplicate detection in `save`
/// happens under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    credentials: RwLock<HashMap<Username, Credential>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user. Tokens already issued to them stop being admitted.
    pub async fn remove(&self, username: &Username) -> Option<Credential> {
        self.credentials.write().await.remove(username)
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, username: &Username) -> Result<bool, AuthError> {
        Ok(self.credentials.read().await.contains_key(username))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, AuthError> {
        Ok(self.credentials.read().await.get(username).cloned())
    }

    async fn save(&self, credential: Credential) -> Result<(), AuthError> {
        match self
            .credentials
            .write()
            .await
            .entry(credential.username.clone())
        {
            Entry::Occupied(_) => Err(AuthError::UsernameTaken(credential.username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(credential);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::UserId;

    fn credential(username: &str, hash: &str) -> Credential {
        Credential {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: hash.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let directory = InMemoryUserDirectory::new();
        let alice = credential("alice", "hash-1");

        directory.save(alice.clone()).await.unwrap();

        assert!(directory.exists(&alice.username).await.unwrap());
        assert_eq!(
            directory.find_by_username(&alice.username).await.unwrap(),
            Some(alice)
        );
    }

    #[tokio::test]
    async fn test_unknown_username() {
        let directory = InMemoryUserDirectory::new();
        let username = Username::new("ghost".to_string()).unwrap();

        assert!(!directory.exists(&username).await.unwrap());
        assert_eq!(directory.find_by_username(&username).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_duplicate_keeps_original() {
        let directory = InMemoryUserDirectory::new();
        let original = credential("alice", "hash-1");

        directory.save(original.clone()).await.unwrap();
        let result = directory.save(credential("alice", "hash-2")).await;

        assert_eq!(result, Err(AuthError::UsernameTaken("alice".to_string())));
        assert_eq!(
            directory.find_by_username(&original.username).await.unwrap(),
            Some(original)
        );
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_saves_admit_exactly_one() {
        let directory = Arc::new(InMemoryUserDirectory::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move {
                    directory
                        .save(credential("alice", &format!("hash-{}", i)))
                        .await
                })
            })
            .collect();

        let mut saved = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                saved += 1;
            }
        }

        assert_eq!(saved, 1);
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let directory = InMemoryUserDirectory::new();
        let alice = credential("alice", "hash-1");
        directory.save(alice.clone()).await.unwrap();

        assert_eq!(directory.remove(&alice.username).await, Some(alice.clone()));
        assert!(!directory.exists(&alice.username).await.unwrap());
        assert!(directory.is_empty().await);
    }
}
