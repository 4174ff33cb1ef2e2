//! # Cache worker — install / activate / fetch
//!
//! Platform-neutral engine behind the browser service worker. The three
//! phases map onto the service worker lifecycle events:
//!
//! - [`CacheWorker::install`] pre-populates the current version's cache
//!   from the [`AssetManifest`], best-effort: a single asset failing to
//!   fetch is logged and skipped, never fails the install.
//! - [`CacheWorker::activate`] deletes every cache whose name is not the
//!   current version tag, leaving exactly one live cache.
//! - [`CacheWorker::respond`] answers a request cache-first; on a miss it
//!   performs a live fetch and returns the response unmodified, without
//!   re-caching it. Network errors propagate to the caller.
//!
//! The backend and the network are traits so that native builds and tests
//! use [`crate::MemoryCaches`] while the web platform plugs in the browser
//! Cache API.

use crate::manifest::AssetManifest;

/// Failure to fetch an asset over the network.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error fetching {path}: {reason}")]
    Network { path: String, reason: String },
}

/// Async trait for storage of named caches of path → body entries.
pub trait CacheBackend {
    /// Names of all caches currently held, live and stale alike.
    fn cache_names(&self) -> impl std::future::Future<Output = Vec<String>>;
    /// Delete a whole cache by name. Returns whether it existed.
    fn delete_cache(&self, name: &str) -> impl std::future::Future<Output = bool>;
    fn get(
        &self,
        cache: &str,
        path: &str,
    ) -> impl std::future::Future<Output = Option<Vec<u8>>>;
    fn put(
        &self,
        cache: &str,
        path: &str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = ()>;
}

/// The network side: fetch an asset body by path.
pub trait AssetSource {
    fn fetch(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, FetchError>>;
}

/// Versioned asset cache over a [`CacheBackend`].
pub struct CacheWorker<B: CacheBackend> {
    backend: B,
    manifest: AssetManifest,
}

impl<B: CacheBackend> CacheWorker<B> {
    pub fn new(backend: B) -> Self {
        Self::with_manifest(backend, AssetManifest::current())
    }

    pub fn with_manifest(backend: B, manifest: AssetManifest) -> Self {
        Self { backend, manifest }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Populate the current version's cache with every manifest asset.
    /// Failures are non-fatal: the asset is skipped and the rest still
    /// get cached.
    pub async fn install(&self, source: &impl AssetSource) {
        let cache = self.manifest.cache_name();
        for path in self.manifest.paths() {
            match source.fetch(path).await {
                Ok(body) => self.backend.put(cache, path, body).await,
                Err(e) => tracing::warn!("failed to cache {path}: {e}"),
            }
        }
    }

    /// Delete every cache from a prior version. The live cache is never
    /// touched, so an activation racing an in-flight lookup stays safe.
    pub async fn activate(&self) {
        for name in self.backend.cache_names().await {
            if !self.manifest.is_current(&name) {
                self.backend.delete_cache(&name).await;
            }
        }
    }

    /// Cache-first lookup with network fallback. The fetched body is
    /// returned as-is and not written back to the cache.
    pub async fn respond(
        &self,
        path: &str,
        source: &impl AssetSource,
    ) -> Result<Vec<u8>, FetchError> {
        if let Some(body) = self.backend.get(self.manifest.cache_name(), path).await {
            return Ok(body);
        }
        source.fetch(path).await
    }
}
