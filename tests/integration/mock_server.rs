//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use wialon::{Wialon, WialonBuilder};

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Create a test client with the mock server as root URL
    pub fn create_test_client(&self) -> wialon::Result<Wialon> {
        self.builder().build()
    }

    /// Builder pointed at the mock server, for tests that need more settings
    pub fn builder(&self) -> WialonBuilder {
        WialonBuilder::new().base_url_override(&self.base_url)
    }

    /// Create a mock for an action answered with a JSON body
    pub fn mock_action(&mut self, svc: &str, body: &str) -> Mock {
        self.server
            .mock("GET", "/ajax.html")
            .match_query(Matcher::UrlEncoded("svc".into(), svc.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Create a mock for an action that also checks additional query parameters
    pub fn mock_action_with_query(&mut self, svc: &str, query: Vec<Matcher>, body: &str) -> Mock {
        let mut matchers = vec![Matcher::UrlEncoded("svc".into(), svc.into())];
        matchers.extend(query);
        self.server
            .mock("GET", "/ajax.html")
            .match_query(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Create a mock with full control over status, content type and body
    pub fn mock_raw(&mut self, path: &str, status: usize, content_type: &str, body: &str) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create()
    }
}
