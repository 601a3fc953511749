//! Policy document store shim.
//!
//! The gateway only needs get/put/delete/list by recipient address. Values
//! are opaque JSON strings; parsing and defaulting happen in the dispatcher
//! and API handlers.

use std::fs;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;

use mailroute_core::error::{MailRouteError, Result};

/// Listed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreKey {
    pub name: String,
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
    async fn list(&self) -> Result<Vec<StoreKey>>;
}

#[derive(Default)]
pub struct InMemoryConfigStore {
    entries: DashMap<String, String>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load `{recipient: document}` pairs. Documents are stored as compact JSON.
    pub fn seed_from_str(&self, s: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| MailRouteError::BadRequest(format!("invalid seed json: {e}")))?;
        let Value::Object(map) = value else {
            return Err(MailRouteError::BadRequest(
                "seed must be a json object keyed by recipient".into(),
            ));
        };
        let n = map.len();
        for (key, doc) in map {
            self.entries.insert(key, doc.to_string());
        }
        Ok(n)
    }

    pub fn seed_from_file(&self, path: &str) -> Result<usize> {
        let s = fs::read_to_string(path)
            .map_err(|e| MailRouteError::Internal(format!("read seed failed ({path}): {e}")))?;
        self.seed_from_str(&s)
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoreKey>> {
        let mut keys: Vec<StoreKey> = self
            .entries
            .iter()
            .map(|e| StoreKey { name: e.key().clone() })
            .collect();
        keys.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(keys)
    }
}
