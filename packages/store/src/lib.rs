pub mod config;
pub mod drafts;
pub mod kv;
pub mod profile;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::OpsDeckConfig;
pub use drafts::DraftCache;
pub use kv::KvStore;
pub use profile::{CachedProfile, ProfileCache, PROFILE_KEY};
