use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Format version written into every record envelope
pub const RECORD_VERSION: u32 = 1;

/// Errors that can occur with storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("record {key} has version {found}, expected {expected}")]
    VersionMismatch { key: String, found: u32, expected: u32 },
}

/// Versioned envelope wrapped around every stored payload
///
/// Earlier incarnations of this data lived as bare blobs with no way to
/// tell formats apart; the version field is the migration hook.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    version: u32,
    payload: serde_json::Value,
}

/// Process-local key-value store
///
/// Stands in for the per-browser storage the app's state used to live in.
/// Values are serialized to JSON and kept under namespaced string keys,
/// one namespace per user id (see [`StorageKey`]).
pub struct Storage {
    entries: RwLock<HashMap<String, String>>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a value by key
    pub async fn get<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned,
    {
        let entries = self.entries.read().await;
        let raw = entries
            .get(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        let record: Record = serde_json::from_str(raw)?;
        if record.version != RECORD_VERSION {
            return Err(StorageError::VersionMismatch {
                key: key.to_string(),
                found: record.version,
                expected: RECORD_VERSION,
            });
        }

        Ok(serde_json::from_value(record.payload)?)
    }

    /// Get a value by key, falling back to the type's default when absent
    pub async fn get_or_default<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        match self.get(key).await {
            Ok(value) => Ok(value),
            Err(StorageError::NotFound(_)) => Ok(T::default()),
            Err(e) => Err(e),
        }
    }

    /// Set a value, replacing any previous record under the key
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        let record = Record {
            version: RECORD_VERSION,
            payload: serde_json::to_value(value)?,
        };
        let raw = serde_json::to_string(&record)?;

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), raw);
        tracing::trace!("Storage set: {}", key);
        Ok(())
    }

    /// Remove a key; returns whether a record existed
    pub async fn remove(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    #[cfg(test)]
    async fn insert_raw(&self, key: &str, raw: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), raw.to_string());
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage key builder
pub struct StorageKey;

impl StorageKey {
    /// Key for the registered-user list
    pub fn users() -> String {
        "users".to_string()
    }

    /// Key for the currently signed-in user
    pub fn current_user() -> String {
        "currentUser".to_string()
    }

    /// Key for a user's matches
    pub fn matches(user_id: &str) -> String {
        format!("matches:{}", user_id)
    }

    /// Key for a user's completed quiz results
    pub fn quiz_results(user_id: &str) -> String {
        format!("quizResults:{}", user_id)
    }

    /// Key for a user's conversations
    pub fn conversations(user_id: &str) -> String {
        format!("conversations:{}", user_id)
    }

    /// Key for a user's messages, grouped by conversation id
    pub fn messages(user_id: &str) -> String {
        format!("messages:{}", user_id)
    }
}
