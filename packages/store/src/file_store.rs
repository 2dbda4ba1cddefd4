//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KvStore`] implementation that persists each key as a
//! file under a base directory. It is used on native platforms to retain the
//! cached profile, config, and drafts across restarts.
//!
//! Keys are sanitised for the filesystem: any character outside
//! `[A-Za-z0-9._-]` is replaced with `_`.
//!
//! Use `dirs::data_dir()` joined with `opsdeck/` to obtain a
//! platform-appropriate base directory.

use std::path::PathBuf;

use crate::kv::KvStore;

/// Filesystem-backed KvStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base.join(safe)
    }
}

impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    async fn set(&self, key: &str, value: String) {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, value);
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("opsdeck_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set("opsdeck.profile", "{\"id\":\"1\"}".to_string()).await;

        // Re-open from same directory
        let store2 = FileStore::new(dir.clone());
        assert_eq!(
            store2.get("opsdeck.profile").await.as_deref(),
            Some("{\"id\":\"1\"}")
        );

        store2.remove("opsdeck.profile").await;
        assert!(store2.get("opsdeck.profile").await.is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_key_sanitisation() {
        let dir = std::env::temp_dir().join(format!("opsdeck_sanitise_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set("drafts/abc:1", "x".to_string()).await;
        assert_eq!(store.get("drafts/abc:1").await.as_deref(), Some("x"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
