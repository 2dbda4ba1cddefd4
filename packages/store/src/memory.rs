use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::kv::KvStore;

/// In-memory KvStore for testing and fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.is_none());

        store.set("k", "v".to_string()).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));

        store.set("k", "v2".to_string()).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v2"));

        store.remove("k").await;
        assert!(store.get("k").await.is_none());
    }
}
