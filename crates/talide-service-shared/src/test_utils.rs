//! Test utilities for handler testing.
//!
//! Builds an [`AppState`] from the well-formed fixture maps under
//! `docs/fixtures/maps`. The malformed `broken.json` fixture is left out so
//! the state loads; tests that need it read it with [`fixture_map`].

use std::path::PathBuf;
use std::sync::OnceLock;

use talide_lib::{load_map, MapData, SearchLimits};

use crate::middleware::RequestId;
use crate::state::AppState;
use crate::store::MapStore;

/// Directory holding the JSON fixture maps.
pub const TEST_FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures/maps");

/// Map ids loaded into [`test_state`].
pub const FIXTURE_MAPS: [&str; 3] = ["cycle", "diamond", "warehouse"];

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

pub fn fixture_maps_dir() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_DIR)
}

/// Load one fixture map by id.
///
/// # Panics
///
/// Panics if the fixture is missing or unparsable.
pub fn fixture_map(id: &str) -> MapData {
    let path = fixture_maps_dir().join(format!("{id}.json"));
    load_map(&path).unwrap_or_else(|e| panic!("failed to load fixture {:?}: {}", path, e))
}

/// Shared state with the fixture maps and default search limits.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| test_state_with_limits(SearchLimits::default()))
        .clone()
}

/// Fresh state with the fixture maps and custom search limits.
pub fn test_state_with_limits(limits: SearchLimits) -> AppState {
    let mut store = MapStore::new();
    for id in FIXTURE_MAPS {
        store
            .insert(id, &fixture_map(id))
            .unwrap_or_else(|e| panic!("fixture map {} failed to build: {}", id, e));
    }
    AppState::from_store(store, limits)
}

pub fn test_request_id() -> String {
    format!("test-{}", RequestId::generate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dir_exists() {
        let dir = fixture_maps_dir();
        assert!(dir.is_dir(), "fixture maps not found at {:?}", dir);
    }

    #[test]
    fn test_state_holds_every_fixture() {
        let state = test_state();
        assert_eq!(state.maps().len(), FIXTURE_MAPS.len());
        let warehouse = state.maps().get("warehouse").expect("warehouse loaded");
        assert_eq!(warehouse.node_count(), 9);
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
