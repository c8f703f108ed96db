//! Application state shared by the route service handlers.

use std::path::Path;
use std::sync::Arc;

use talide_lib::{Error as LibError, SearchLimits};

use crate::store::MapStore;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The configured maps directory does not exist.
    MapsDirNotFound(String),

    /// A map file could not be read, parsed or built.
    MapLoad { path: String, source: LibError },

    /// Listing the maps directory failed.
    Io(std::io::Error),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MapsDirNotFound(path) => write!(f, "maps directory not found: {}", path),
            Self::MapLoad { path, source } => write!(f, "failed to load map {}: {}", path, source),
            Self::Io(e) => write!(f, "failed to read maps directory: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MapLoad { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::MapsDirNotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for AppStateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone (`Arc` inside); share it through axum's `State` extractor.
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use talide_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) -> String {
///     format!("{} maps", state.maps().len())
/// }
///
/// let state = AppState::load("/data/maps", Default::default()).unwrap();
/// let app = Router::new().route("/maps", get(handler)).with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    maps: MapStore,
    limits: SearchLimits,
}

impl AppState {
    /// Load every map in `maps_dir` and pair them with the per-request
    /// search limits.
    pub fn load(maps_dir: impl AsRef<Path>, limits: SearchLimits) -> Result<Self, AppStateError> {
        let maps_dir = maps_dir.as_ref();
        tracing::info!(path = %maps_dir.display(), "loading maps");
        let maps = MapStore::load_dir(maps_dir)?;
        tracing::info!(map_count = maps.len(), "maps loaded");
        Ok(Self::from_store(maps, limits))
    }

    /// Create application state from an already populated store.
    pub fn from_store(maps: MapStore, limits: SearchLimits) -> Self {
        Self {
            inner: Arc::new(AppStateInner { maps, limits }),
        }
    }

    pub fn maps(&self) -> &MapStore {
        &self.inner.maps
    }

    /// Limits applied to every routing request.
    pub fn limits(&self) -> SearchLimits {
        self.inner.limits
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("map_count", &self.inner.maps.len())
            .field("limits", &self.inner.limits)
            .finish()
    }
}
