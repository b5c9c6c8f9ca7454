//! Shared helpers for handler and use case tests.
//!
//! `TestPorts::default()` wires an empty in-memory store, a catalog with no
//! files, a file sink that always succeeds, portraits that always load and a
//! fixed initiative roll of 10. Override single ports with struct update
//! syntax:
//!
//! ```rust,ignore
//! let app = test_app_with(TestPorts {
//!     store: Arc::new(mock),
//!     ..TestPorts::default()
//! });
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::api::routes;
use crate::app::{App, Ports};
use crate::infrastructure::clock::{FixedClock, FixedRandom};
use crate::infrastructure::memory_store::InMemoryTemplateStore;
use crate::infrastructure::ports::{
    CatalogError, CatalogSource, MockCatalogSource, MockPortraitValidator, MockTemplateFileSink,
    PortraitValidator, RandomPort, TemplateFileSink, TemplateStore,
};
use crate::infrastructure::template_files::template_file_name;

/// Initiative every premade add rolls in tests.
pub const FIXED_ROLL: i32 = 10;

pub struct TestPorts {
    pub store: Arc<dyn TemplateStore>,
    pub catalog: Arc<dyn CatalogSource>,
    pub sink: Arc<dyn TemplateFileSink>,
    pub portraits: Arc<dyn PortraitValidator>,
    pub random: Arc<dyn RandomPort>,
}

impl Default for TestPorts {
    fn default() -> Self {
        let clock = FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        );

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_load_category()
            .returning(|category| Err(CatalogError::missing(format!("{category}/catalog.txt"))));

        let mut sink = MockTemplateFileSink::new();
        sink.expect_write_custom()
            .returning(|template| Ok(template_file_name(template.name().as_str())));

        let mut portraits = MockPortraitValidator::new();
        portraits.expect_is_loadable().returning(|_| true);

        Self {
            store: Arc::new(InMemoryTemplateStore::new(Arc::new(clock))),
            catalog: Arc::new(catalog),
            sink: Arc::new(sink),
            portraits: Arc::new(portraits),
            random: Arc::new(FixedRandom(FIXED_ROLL)),
        }
    }
}

impl From<TestPorts> for Ports {
    fn from(ports: TestPorts) -> Self {
        Ports {
            store: ports.store,
            catalog: ports.catalog,
            sink: ports.sink,
            portraits: ports.portraits,
            random: ports.random,
        }
    }
}

/// Router over default test ports.
pub fn test_app() -> Router {
    test_app_with(TestPorts::default())
}

pub fn test_app_with(ports: TestPorts) -> Router {
    routes().with_state(Arc::new(App::new(ports.into())))
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}
