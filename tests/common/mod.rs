//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLOUD_PAGE: &str = r#"<html><head><title>Configure Lineage</title></head>
<body>
  <header><p class="cloud-label">Alation Cloud Service</p></header>
  <nav>Home Admin Security</nav>
  <article>
    <h1>Configure Lineage</h1>
    <p>A Steward can review lineage graphs. The Steward approves lineage changes.</p>
  </article>
  <footer>Copyright Viewer Inc</footer>
</body></html>"#;

pub const ON_PREM_PAGE: &str = r#"<html><head><title>Install the Server</title></head>
<body><article>
  <p class="on-prem-label">Customer Managed</p>
  <p>Server Admin tasks for installation and Security hardening.</p>
</article></body></html>"#;

pub const UNMARKED_PAGE: &str = r#"<html><head><title>Data Quality Overview</title></head>
<body><main>
  <p>Data Quality monitors help every Viewer trust the catalog.</p>
  <p>Install the Snowflake OCF Connector to profile Snowflake tables.</p>
</main></body></html>"#;

/// Serve `html` as UTF-8 HTML at `url_path`.
pub async fn mount_page(server: &MockServer, url_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Serve `html` at `url_path` after `delay`.
pub async fn mount_slow_page(server: &MockServer, url_path: &str, html: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Serve `html` at `url_path`, expecting exactly `times` requests.
pub async fn mount_counted_page(server: &MockServer, url_path: &str, html: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Serve a fixed status and no body.
pub async fn mount_status(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn url(server: &MockServer, url_path: &str) -> String {
    format!("{}{url_path}", server.uri())
}
