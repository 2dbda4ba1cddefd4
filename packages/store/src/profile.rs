//! # Cached user profile
//!
//! The server session cookie is the source of truth for authentication; the
//! client additionally caches the last-known profile under [`PROFILE_KEY`] so
//! the dashboard shell can render name, role, and avatar before the first
//! round-trip completes. The cache is overwritten on every successful login or
//! profile fetch and cleared on logout.

use serde::{Deserialize, Serialize};

use crate::kv::KvStore;

/// Key under which the serialized [`CachedProfile`] lives.
pub const PROFILE_KEY: &str = "opsdeck.profile";

/// Client-side snapshot of the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Set while an admin is impersonating this user.
    #[serde(default)]
    pub impersonated: bool,
}

/// Reads and writes the cached profile through any [`KvStore`].
#[derive(Clone, Debug)]
pub struct ProfileCache<S: KvStore> {
    store: S,
}

impl<S: KvStore> ProfileCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Option<CachedProfile> {
        let raw = self.store.get(PROFILE_KEY).await?;
        serde_json::from_str(&raw).ok()
    }

    pub async fn save(&self, profile: &CachedProfile) {
        if let Ok(raw) = serde_json::to_string(profile) {
            self.store.set(PROFILE_KEY, raw).await;
        }
    }

    pub async fn clear(&self) {
        self.store.remove(PROFILE_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn sample() -> CachedProfile {
        CachedProfile {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "admin".to_string(),
            avatar_url: None,
            impersonated: false,
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let cache = ProfileCache::new(MemoryStore::new());
        assert!(cache.load().await.is_none());

        cache.save(&sample()).await;
        assert_eq!(cache.load().await, Some(sample()));

        cache.clear().await;
        assert!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_cache_reads_as_none() {
        let store = MemoryStore::new();
        store.set(PROFILE_KEY, "not json".to_string()).await;
        let cache = ProfileCache::new(store);
        assert!(cache.load().await.is_none());
    }
}
