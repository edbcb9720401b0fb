use std::time::Duration;

use reqwest::Client;

/// Build the HTTP client shared by every provider
///
/// Built once per gateway and handed to each provider, so all routes reuse
/// the same connection pool. The client sets no overall request timeout;
/// providers that want one set it per request.
pub fn build_http_client() -> reqwest::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
}
