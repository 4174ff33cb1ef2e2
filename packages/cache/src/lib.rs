pub mod manifest;
pub mod worker;

mod memory;
pub use memory::MemoryCaches;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserCaches;

pub use manifest::AssetManifest;
pub use worker::{AssetSource, CacheBackend, CacheWorker, FetchError};
