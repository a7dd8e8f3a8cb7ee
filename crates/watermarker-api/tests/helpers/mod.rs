//! Test helpers: build the router against an isolated scratch directory.
//!
//! Run from workspace root: `cargo test -p watermarker-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use watermarker_api::setup::routes;
use watermarker_api::state::AppState;
use watermarker_core::{Config, WatermarkServiceConfig};

/// Test application: server plus the scratch root it spools into.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of entries left in the scratch root
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.temp_dir.path())
            .expect("scratch root readable")
            .count()
    }
}

/// Setup test app with default limits.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

/// Setup test app with configuration overrides (env-style keys).
pub fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert(
        "TEMP_DIR".to_string(),
        temp_dir.path().to_string_lossy().to_string(),
    );

    let service_config = WatermarkServiceConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test config");
    service_config.validate().expect("Invalid test config");
    let config = Config::from(service_config);

    let state = Arc::new(AppState::new(config.clone()));
    let router = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, temp_dir }
}
