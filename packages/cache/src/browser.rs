//! # Browser Cache API backend — service worker side
//!
//! [`BrowserCaches`] is the [`CacheBackend`] used inside the service
//! worker, built on `web_sys::CacheStorage`. Like the rest of the
//! browser storage layer it swallows errors: an unavailable Cache API
//! degrades to "nothing cached" and every request falls through to the
//! network instead of crashing the worker.
//!
//! The `worker_*` exports are the wasm entry points called by the
//! `service-worker.js` bootstrap, one per lifecycle event. The fetch
//! export stays on browser `Request`/`Response` types rather than going
//! through the byte-level backend, so status codes and headers survive
//! the round-trip untouched; the byte-level backend serves install and
//! activation.

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, CacheStorage, Request, Response, ServiceWorkerGlobalScope};

use crate::worker::{AssetSource, CacheBackend, CacheWorker, FetchError};

fn scope() -> Option<ServiceWorkerGlobalScope> {
    js_sys::global().dyn_into::<ServiceWorkerGlobalScope>().ok()
}

/// Cache API backend for the service worker context.
#[derive(Clone, Copy, Default)]
pub struct BrowserCaches;

impl BrowserCaches {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<CacheStorage> {
        scope()?.caches().ok()
    }

    async fn open(name: &str) -> Option<Cache> {
        let storage = Self::storage()?;
        JsFuture::from(storage.open(name))
            .await
            .ok()?
            .dyn_into()
            .ok()
    }
}

impl CacheBackend for BrowserCaches {
    async fn cache_names(&self) -> Vec<String> {
        let Some(storage) = Self::storage() else {
            return Vec::new();
        };
        let Ok(keys) = JsFuture::from(storage.keys()).await else {
            return Vec::new();
        };
        js_sys::Array::from(&keys)
            .iter()
            .filter_map(|v| v.as_string())
            .collect()
    }

    async fn delete_cache(&self, name: &str) -> bool {
        let Some(storage) = Self::storage() else {
            return false;
        };
        JsFuture::from(storage.delete(name))
            .await
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    async fn get(&self, cache: &str, path: &str) -> Option<Vec<u8>> {
        let cache = Self::open(cache).await?;
        let matched = JsFuture::from(cache.match_with_str(path)).await.ok()?;
        // A miss resolves to `undefined`, which fails the cast.
        let response: Response = matched.dyn_into().ok()?;
        let buffer = JsFuture::from(response.array_buffer().ok()?).await.ok()?;
        Some(Uint8Array::new(&buffer).to_vec())
    }

    async fn put(&self, cache: &str, path: &str, mut body: Vec<u8>) {
        let Some(cache) = Self::open(cache).await else {
            return;
        };
        let Ok(response) = Response::new_with_opt_u8_array(Some(body.as_mut_slice())) else {
            return;
        };
        let _ = JsFuture::from(cache.put_with_str(path, &response)).await;
    }
}

/// Network fetch through the worker scope.
struct ScopeSource;

impl ScopeSource {
    fn network_error(path: &str, reason: impl std::fmt::Debug) -> FetchError {
        FetchError::Network {
            path: path.to_string(),
            reason: format!("{reason:?}"),
        }
    }
}

impl AssetSource for ScopeSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let scope = scope().ok_or_else(|| Self::network_error(path, "no worker scope"))?;
        let fetched = JsFuture::from(scope.fetch_with_str(path))
            .await
            .map_err(|e| Self::network_error(path, e))?;
        let response: Response = fetched
            .dyn_into()
            .map_err(|e| Self::network_error(path, e))?;
        if !response.ok() {
            return Err(Self::network_error(path, response.status()));
        }
        let promise = response
            .array_buffer()
            .map_err(|e| Self::network_error(path, e))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| Self::network_error(path, e))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

/// `install` event: populate the current cache, then activate without
/// waiting for existing clients to close.
#[wasm_bindgen]
pub async fn worker_install() {
    let worker = CacheWorker::new(BrowserCaches::new());
    worker.install(&ScopeSource).await;

    if let Some(scope) = scope() {
        match scope.skip_waiting() {
            Ok(promise) => {
                let _ = JsFuture::from(promise).await;
            }
            Err(e) => tracing::warn!("skip_waiting failed: {e:?}"),
        }
    }
}

/// `activate` event: purge caches from prior versions.
#[wasm_bindgen]
pub async fn worker_activate() {
    CacheWorker::new(BrowserCaches::new()).activate().await;
}

/// `fetch` event: cached response if present, live fetch otherwise.
#[wasm_bindgen]
pub async fn worker_fetch(request: Request) -> Result<Response, JsValue> {
    if let Some(storage) = BrowserCaches::storage() {
        if let Ok(matched) = JsFuture::from(storage.match_with_request(&request)).await {
            if let Ok(cached) = matched.dyn_into::<Response>() {
                return Ok(cached);
            }
        }
    }

    let scope = scope().ok_or_else(|| JsValue::from_str("no worker scope"))?;
    let fetched = JsFuture::from(scope.fetch_with_request(&request)).await?;
    fetched
        .dyn_into::<Response>()
        .map_err(|_| JsValue::from_str("fetch did not produce a Response"))
}
