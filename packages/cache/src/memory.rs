use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::worker::{AssetSource, CacheBackend, FetchError};

/// In-memory CacheBackend for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryCaches {
    caches: Arc<Mutex<HashMap<String, HashMap<String, Vec<u8>>>>>,
}

impl MemoryCaches {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryCaches {
    async fn cache_names(&self) -> Vec<String> {
        self.caches.lock().unwrap().keys().cloned().collect()
    }

    async fn delete_cache(&self, name: &str) -> bool {
        self.caches.lock().unwrap().remove(name).is_some()
    }

    async fn get(&self, cache: &str, path: &str) -> Option<Vec<u8>> {
        self.caches
            .lock()
            .unwrap()
            .get(cache)
            .and_then(|entries| entries.get(path))
            .cloned()
    }

    async fn put(&self, cache: &str, path: &str, body: Vec<u8>) {
        self.caches
            .lock()
            .unwrap()
            .entry(cache.to_string())
            .or_default()
            .insert(path.to_string(), body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::AssetManifest;
    use crate::worker::CacheWorker;
    use std::collections::HashSet;

    /// Test AssetSource that counts network hits and can be told to fail
    /// for specific paths.
    #[derive(Clone, Default)]
    struct StaticSource {
        assets: HashMap<String, Vec<u8>>,
        failing: HashSet<String>,
        hits: Arc<Mutex<usize>>,
    }

    impl StaticSource {
        fn with_assets(paths: &[&str]) -> Self {
            let mut source = Self::default();
            for path in paths {
                source
                    .assets
                    .insert(path.to_string(), format!("body of {path}").into_bytes());
            }
            source
        }

        fn failing_on(mut self, path: &str) -> Self {
            self.failing.insert(path.to_string());
            self
        }

        fn network_hits(&self) -> usize {
            *self.hits.lock().unwrap()
        }
    }

    impl AssetSource for StaticSource {
        async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
            *self.hits.lock().unwrap() += 1;
            if self.failing.contains(path) {
                return Err(FetchError::Network {
                    path: path.to_string(),
                    reason: "connection refused".to_string(),
                });
            }
            self.assets
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::Network {
                    path: path.to_string(),
                    reason: "not found".to_string(),
                })
        }
    }

    fn manifest(paths: &[&str]) -> AssetManifest {
        AssetManifest::new("userhub-v2", paths.iter().map(|p| p.to_string()))
    }

    #[tokio::test]
    async fn install_then_respond_serves_from_cache() {
        let paths = ["/", "/assets/main.css"];
        let source = StaticSource::with_assets(&paths);
        let worker = CacheWorker::with_manifest(MemoryCaches::new(), manifest(&paths));

        worker.install(&source).await;
        let hits_after_install = source.network_hits();

        for path in paths {
            let body = worker.respond(path, &source).await.unwrap();
            assert_eq!(body, format!("body of {path}").into_bytes());
        }
        // No network round-trips for cached assets.
        assert_eq!(source.network_hits(), hits_after_install);
    }

    #[tokio::test]
    async fn install_skips_failed_assets() {
        let paths = ["/", "/assets/logo.png"];
        let source = StaticSource::with_assets(&paths).failing_on("/assets/logo.png");
        let worker = CacheWorker::with_manifest(MemoryCaches::new(), manifest(&paths));

        // Install must not fail even though one asset can't be fetched.
        worker.install(&source).await;

        let hits = source.network_hits();
        assert!(worker.respond("/", &source).await.is_ok());
        assert_eq!(source.network_hits(), hits);

        // The failed asset stays uncached and keeps failing through the
        // network path.
        assert!(worker.respond("/assets/logo.png", &source).await.is_err());
        assert_eq!(source.network_hits(), hits + 1);
    }

    #[tokio::test]
    async fn activate_removes_every_stale_cache() {
        let backend = MemoryCaches::new();
        backend.put("userhub-v1", "/", b"old".to_vec()).await;
        backend.put("userhub-v0", "/", b"older".to_vec()).await;
        backend.put("userhub-v2", "/", b"live".to_vec()).await;

        let worker = CacheWorker::with_manifest(backend.clone(), manifest(&["/"]));
        worker.activate().await;

        let mut names = backend.cache_names().await;
        names.sort();
        assert_eq!(names, vec!["userhub-v2".to_string()]);
        assert_eq!(backend.get("userhub-v2", "/").await, Some(b"live".to_vec()));
    }

    #[tokio::test]
    async fn respond_miss_fetches_without_recaching() {
        let source = StaticSource::with_assets(&["/uncached"]);
        let worker = CacheWorker::with_manifest(MemoryCaches::new(), manifest(&[]));

        assert!(worker.respond("/uncached", &source).await.is_ok());
        assert_eq!(source.network_hits(), 1);

        // Still a miss the second time: fetched responses are not
        // written back to the cache.
        assert!(worker.respond("/uncached", &source).await.is_ok());
        assert_eq!(source.network_hits(), 2);
    }

    #[tokio::test]
    async fn respond_propagates_network_failure() {
        let source = StaticSource::default().failing_on("/");
        let worker = CacheWorker::with_manifest(MemoryCaches::new(), manifest(&[]));

        let err = worker.respond("/", &source).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
