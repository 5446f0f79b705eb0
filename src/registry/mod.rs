//! Client route registry
//!
//! Holds the flattened client route table as an immutable [`RouteSnapshot`]
//! behind an [`ArcSwap`]. Readers take a snapshot without locking; a reload
//! builds a complete new snapshot and swaps it in, so a reader never sees a
//! half-updated table.

mod flatten;

pub use flatten::{flatten_routes, has_main_layout, join_path};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use route_model::{CatalogError, ClientViewConfig, FILE_ROUTES_JSON};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, TryLockError};
use std::time::SystemTime;

/// One immutable version of the client route table.
#[derive(Debug, Clone)]
pub struct RouteSnapshot {
    /// Flattened routes keyed by normalized path.
    pub routes: BTreeMap<String, ClientViewConfig>,
    pub has_main_layout: bool,
    /// SHA-256 of the route file this snapshot was built from (None if built in memory)
    pub digest: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

impl RouteSnapshot {
    fn build(nodes: &[ClientViewConfig], digest: Option<String>) -> Self {
        Self {
            routes: flatten_routes(nodes),
            has_main_layout: has_main_layout(nodes),
            digest,
            loaded_at: Utc::now(),
        }
    }

    fn empty() -> Self {
        Self::build(&[], None)
    }
}

/// Location of the generated route file in development mode.
#[derive(Debug, Clone)]
pub struct DevModeSource {
    frontend_dir: PathBuf,
}

impl DevModeSource {
    pub fn new(frontend_dir: impl Into<PathBuf>) -> Self {
        Self {
            frontend_dir: frontend_dir.into(),
        }
    }

    /// `<frontend>/generated/file-routes.json`
    pub fn route_file(&self) -> PathBuf {
        self.frontend_dir.join("generated").join(FILE_ROUTES_JSON)
    }
}

#[derive(Debug, Default)]
struct ReloadState {
    last_modified: Option<SystemTime>,
}

/// The client-side route table.
#[derive(Debug)]
pub struct ClientRouteRegistry {
    snapshot: ArcSwap<RouteSnapshot>,
    reload: Mutex<ReloadState>,
}

impl Default for ClientRouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRouteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(RouteSnapshot::empty()),
            reload: Mutex::new(ReloadState::default()),
        }
    }

    /// Build a registry from an in-memory route tree.
    pub fn from_configs(nodes: Vec<ClientViewConfig>) -> Self {
        let registry = Self::new();
        registry.replace(&nodes);
        registry
    }

    /// Load a registry from a `file-routes.json` file.
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let bytes = fs::read(path).map_err(|e| CatalogError::route_file(path.display(), e))?;
        let (nodes, digest) = parse_route_file(path, &bytes)?;
        let registry = Self::new();
        registry
            .snapshot
            .store(Arc::new(RouteSnapshot::build(&nodes, Some(digest))));
        Ok(registry)
    }

    /// Swap in a new route tree.
    pub fn replace(&self, nodes: &[ClientViewConfig]) {
        self.snapshot.store(Arc::new(RouteSnapshot::build(nodes, None)));
    }

    /// Current snapshot of all routes.
    pub fn get_all_routes(&self) -> Arc<RouteSnapshot> {
        self.snapshot.load_full()
    }

    pub fn has_main_layout(&self) -> bool {
        self.snapshot.load().has_main_layout
    }

    /// Reload the route file if it changed since the last check.
    ///
    /// Returns true if a new snapshot was swapped in. If another caller is
    /// already reloading, this returns false immediately and the caller reads
    /// the current snapshot. A missing or unparseable file keeps the current
    /// snapshot.
    pub fn refresh_if_stale(&self, source: &DevModeSource) -> bool {
        let mut state = match self.reload.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return false,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        let path = source.route_file();
        let modified = match fs::metadata(&path) {
            Ok(metadata) => metadata.modified().ok(),
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "no client route file");
                return false;
            }
        };
        if modified.is_some() && modified == state.last_modified {
            return false;
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read client route file");
                return false;
            }
        };
        state.last_modified = modified;

        let current = self.snapshot.load();
        let (nodes, digest) = match parse_route_file(&path, &bytes) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "keeping previous client routes");
                return false;
            }
        };
        if current.digest.as_deref() == Some(digest.as_str()) {
            return false;
        }

        let snapshot = RouteSnapshot::build(&nodes, Some(digest));
        tracing::debug!(
            path = %path.display(),
            routes = snapshot.routes.len(),
            digest = ?snapshot.digest,
            "reloaded client routes"
        );
        self.snapshot.store(Arc::new(snapshot));
        true
    }
}

fn parse_route_file(path: &Path, bytes: &[u8]) -> Result<(Vec<ClientViewConfig>, String), CatalogError> {
    let digest = hex::encode(Sha256::digest(bytes));
    let nodes: Vec<ClientViewConfig> =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::route_file(path.display(), e))?;
    Ok((nodes, digest))
}
