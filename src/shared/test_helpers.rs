use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;

use crate::core::config::AuthConfig;
use crate::features::{api_routes, auth::JwtValidator};
use crate::modules::store::MemoryCatalogStore;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Full API over a fresh in-memory store. The store handle is returned so
/// tests can seed data or inject write failures.
pub fn test_server() -> (TestServer, Arc<MemoryCatalogStore>) {
    let store = Arc::new(MemoryCatalogStore::new());
    let validator = Arc::new(JwtValidator::new(&AuthConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        issuer: None,
        audience: None,
        jwt_leeway: Duration::from_secs(0),
    }));

    let router = api_routes(store.clone(), validator);
    (TestServer::new(router).unwrap(), store)
}
