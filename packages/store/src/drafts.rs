//! # Local manuscript-draft snapshots
//!
//! [`DraftCache`] keeps the submission wizard's in-progress state on the
//! client so a reload does not lose work between autosaves. Each draft is
//! stored under `opsdeck.draft.<draft_id>` together with a SHA-1 fingerprint
//! of the serialized payload.
//!
//! The fingerprint is what makes autosave cheap: the wizard asks
//! [`DraftCache::is_changed`] on every tick and skips the server call when
//! the content hash is unchanged. The snapshot is recorded with
//! [`DraftCache::save`] only after the server write succeeds, so a failed
//! save stays "changed" and is re-sent on the next tick.

use sha1::{Digest, Sha1};

use crate::kv::KvStore;

fn draft_key(draft_id: &str) -> String {
    format!("opsdeck.draft.{draft_id}")
}

fn fingerprint_key(draft_id: &str) -> String {
    format!("opsdeck.draft.{draft_id}.sha")
}

/// Hex SHA-1 of a serialized draft payload.
pub fn fingerprint(payload: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(payload.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Stores draft payloads keyed by draft id, with change detection.
#[derive(Clone, Debug)]
pub struct DraftCache<S: KvStore> {
    store: S,
}

impl<S: KvStore> DraftCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self, draft_id: &str) -> Option<String> {
        self.store.get(&draft_key(draft_id)).await
    }

    /// Whether the payload's fingerprint differs from the recorded snapshot.
    /// Read-only: records nothing.
    pub async fn is_changed(&self, draft_id: &str, payload: &str) -> bool {
        self.store.get(&fingerprint_key(draft_id)).await.as_deref()
            != Some(fingerprint(payload).as_str())
    }

    /// Persist the payload and record its fingerprint.
    pub async fn save(&self, draft_id: &str, payload: &str) {
        let sha = fingerprint(payload);
        self.store.set(&draft_key(draft_id), payload.to_string()).await;
        self.store.set(&fingerprint_key(draft_id), sha).await;
    }

    pub async fn clear(&self, draft_id: &str) {
        self.store.remove(&draft_key(draft_id)).await;
        self.store.remove(&fingerprint_key(draft_id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_unchanged_payload_detected_after_save() {
        let cache = DraftCache::new(MemoryStore::new());

        assert!(cache.is_changed("d1", "{\"title\":\"A\"}").await);
        cache.save("d1", "{\"title\":\"A\"}").await;
        assert!(!cache.is_changed("d1", "{\"title\":\"A\"}").await);
        assert!(cache.is_changed("d1", "{\"title\":\"B\"}").await);
        assert_eq!(cache.load("d1").await.as_deref(), Some("{\"title\":\"A\"}"));
    }

    #[tokio::test]
    async fn test_is_changed_records_nothing() {
        let cache = DraftCache::new(MemoryStore::new());

        // A save attempt that never reaches `save` (the server rejected it)
        // must leave the payload looking changed so it is sent again.
        assert!(cache.is_changed("d1", "x").await);
        assert!(cache.is_changed("d1", "x").await);
        assert!(cache.load("d1").await.is_none());

        cache.save("d1", "x").await;
        assert!(!cache.is_changed("d1", "x").await);
    }

    #[tokio::test]
    async fn test_drafts_are_independent() {
        let cache = DraftCache::new(MemoryStore::new());
        cache.save("d1", "x").await;
        cache.save("d2", "x").await;

        cache.clear("d1").await;
        assert!(cache.load("d1").await.is_none());
        assert_eq!(cache.load("d2").await.as_deref(), Some("x"));
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let a = fingerprint("hello");
        assert_eq!(a.len(), 40);
        assert_eq!(a, fingerprint("hello"));
        assert_ne!(a, fingerprint("hello!"));
    }
}
