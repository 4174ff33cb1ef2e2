//! # Asset manifest — what gets cached, and under which version
//!
//! The manifest pairs a version tag with the fixed list of static asset
//! paths that the cache worker pre-populates at install time. The version
//! tag doubles as the cache name: bumping [`CACHE_VERSION`] on deploy
//! replaces the cached set wholesale on the next activation, which is the
//! only way cache contents ever change.

/// Cache version tag, bumped manually on deploy.
pub const CACHE_VERSION: &str = "userhub-v2";

/// Static asset paths pre-populated into the cache at install time.
pub const CACHE_FILES: &[&str] = &[
    "/",
    "/assets/main.css",
    "/wasm/web.js",
    "/wasm/web_bg.wasm",
    "/assets/logo.png",
    "/assets/favicon.ico",
];

/// A versioned set of asset paths.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetManifest {
    version: String,
    paths: Vec<String>,
}

impl AssetManifest {
    /// The manifest for the currently deployed version.
    pub fn current() -> Self {
        Self::new(CACHE_VERSION, CACHE_FILES.iter().map(|p| p.to_string()))
    }

    pub fn new(version: &str, paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            version: version.to_string(),
            paths: paths.into_iter().collect(),
        }
    }

    /// The cache name for this version.
    pub fn cache_name(&self) -> &str {
        &self.version
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Whether `name` refers to the live cache. Anything else is stale
    /// and gets deleted during activation.
    pub fn is_current(&self, name: &str) -> bool {
        name == self.version
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_manifest_lists_static_assets() {
        let manifest = AssetManifest::current();
        assert_eq!(manifest.cache_name(), CACHE_VERSION);
        assert!(manifest.paths().iter().any(|p| p == "/"));
        assert!(manifest.paths().iter().any(|p| p == "/assets/main.css"));
        assert_eq!(manifest.paths().len(), CACHE_FILES.len());
    }

    #[test]
    fn only_the_exact_version_is_current() {
        let manifest = AssetManifest::new("userhub-v3", vec!["/".to_string()]);
        assert!(manifest.is_current("userhub-v3"));
        assert!(!manifest.is_current("userhub-v2"));
        assert!(!manifest.is_current("userhub-v3-old"));
    }
}
