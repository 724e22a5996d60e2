//! Shared constructors for handler and end-to-end tests.

use std::sync::Arc;

use axum_test::TestServer;

use crate::config::{Config, StorageConfig};
use crate::storage::{MockObjectStore, ObjectStore};
use crate::{AppState, build_router};

/// Default config with the given bucket, ready for injected-fake tests.
pub fn test_config(bucket: Option<&str>) -> Config {
    Config {
        storage: StorageConfig {
            bucket: bucket.map(str::to_string),
            ..StorageConfig::default()
        },
        ..Config::default()
    }
}

/// Test server over the full router, backed by the given mock store.
pub fn test_server(config: Config, store: MockObjectStore) -> TestServer {
    let store: Arc<dyn ObjectStore> = Arc::new(store);
    let state = AppState::builder().store(store).config(config).build();
    TestServer::new(build_router(state)).expect("Failed to create test server")
}
