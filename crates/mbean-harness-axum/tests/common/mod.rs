//! Shared helpers for the control-service integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mbean_harness_axum::{bootstrap, create_router};
use mbean_harness_core::{MBeanServerPort, ObjectName};

/// A router plus a handle on the registry behind it.
pub struct Harness {
    pub app: Router,
    pub server: Arc<dyn MBeanServerPort>,
}

impl Harness {
    pub fn new() -> Self {
        let ctx = bootstrap();
        let server = Arc::clone(&ctx.server);
        Self {
            app: create_router(ctx),
            server,
        }
    }

    /// Send one request and return the status and body text.
    pub async fn send(&self, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn post(&self, uri: &str, body: &str) -> (StatusCode, String) {
        self.send(Method::POST, uri, body).await
    }

    pub async fn clear(&self) -> (StatusCode, String) {
        self.send(Method::PUT, "/clear", "").await
    }

    /// Number of registry entries matching `pattern`.
    pub fn count(&self, pattern: &str) -> usize {
        let pattern = ObjectName::parse(pattern).unwrap();
        self.server.query_names(Some(&pattern)).len()
    }
}
