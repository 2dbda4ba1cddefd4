//! Platform selection for the client-side key-value store.
//!
//! The browser build persists to `localStorage`; everything else (server-side
//! rendering, desktop dev builds) writes files under the platform data dir.

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type ClientStore = store::LocalStore;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type ClientStore = store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn make_store() -> ClientStore {
    store::LocalStore::new()
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn make_store() -> ClientStore {
    let base = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("opsdeck");
    store::FileStore::new(base)
}
