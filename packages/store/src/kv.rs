//! # Client-side key-value persistence
//!
//! [`KvStore`] is the abstract interface behind every piece of state OpsDeck
//! keeps on the client between sessions: the `opsdeck.toml` configuration, the
//! cached user-profile object, and local manuscript-draft snapshots. All values
//! are stored as strings under well-known keys.
//!
//! Implementations live in sibling modules:
//!
//! | Backend | Module | Used on |
//! |---------|--------|---------|
//! | [`crate::MemoryStore`] | `memory` | tests, fallback |
//! | [`crate::FileStore`] | `file_store` | native (server-side rendering, dev) |
//! | `LocalStore` | `local` (wasm + `web` feature) | browser `localStorage` |

/// Async string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(&self, key: &str, value: String) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}
