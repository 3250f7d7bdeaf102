//! Typed accessors for the upstream services
//!
//! Each client issues a single GET per call and reports the raw reply.
//! Transport-level failures are converted into [`TransportError`]; they
//! never propagate as an unhandled fault.

use crate::gateway::types::{Symbol, TransportError, UpstreamBaseUrl, UpstreamResponse};
use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

/// Content type assumed when the upstream omits the header
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP accessor for one upstream service.
///
/// The base URL is fixed at startup; the relative path and symbol vary
/// per call. One attempt per call, no retry.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: UpstreamBaseUrl,
    timeout: Duration,
    client: Client<HttpConnector, Body>,
}

impl UpstreamClient {
    pub fn new(base_url: UpstreamBaseUrl, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();

        Self {
            base_url,
            timeout,
            client,
        }
    }

    /// Issue a GET for `path` with the symbol in the query string.
    ///
    /// Success means the HTTP exchange completed, whatever the status;
    /// the reply is returned without parsing or transformation.
    pub async fn fetch(
        &self,
        path: &str,
        symbol: &Symbol,
    ) -> Result<UpstreamResponse, TransportError> {
        let uri = self.request_uri(path, symbol)?;

        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .map_err(|e| TransportError::InvalidUri(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))?
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let (parts, body) = response.into_parts();

        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| header::HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let body = body
            .collect()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_bytes();

        Ok(UpstreamResponse {
            status: parts.status,
            content_type,
            body,
        })
    }

    fn request_uri(&self, path: &str, symbol: &Symbol) -> Result<Uri, TransportError> {
        let url = format!(
            "{}{}?symbol={}",
            self.base_url.as_ref().trim_end_matches('/'),
            path,
            urlencoding::encode(symbol.as_ref())
        );

        url.parse().map_err(|_| TransportError::InvalidUri(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    fn symbol(s: &str) -> Symbol {
        Symbol::try_new(s.to_string()).unwrap()
    }

    fn base(url: &str) -> UpstreamBaseUrl {
        UpstreamBaseUrl::try_new(url.to_string()).unwrap()
    }

    #[test]
    fn test_request_uri_joins_base_and_path() {
        let client = UpstreamClient::new(base("http://svc-pricing-go:8080/"), Duration::from_secs(1));
        let uri = client.request_uri("/series", &symbol("AAPL")).unwrap();
        assert_eq!(uri.to_string(), "http://svc-pricing-go:8080/series?symbol=AAPL");
    }

    #[test]
    fn test_request_uri_percent_encodes_the_symbol() {
        let client = UpstreamClient::new(base("http://svc-pricing-go:8080"), Duration::from_secs(1));
        let uri = client.request_uri("/series", &symbol("BRK B")).unwrap();
        assert_eq!(uri.to_string(), "http://svc-pricing-go:8080/series?symbol=BRK%20B");
    }

    #[tokio::test]
    async fn test_fetch_returns_status_content_type_and_body() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[{"t":1700000000000,"c":150.25}]"#;
        let mock = server
            .mock("GET", "/series")
            .match_query(mockito::Matcher::UrlEncoded("symbol".into(), "AAPL".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = UpstreamClient::new(base(&server.url()), Duration::from_secs(5));
        let response = client.fetch("/series", &symbol("AAPL")).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type, "application/json");
        assert_eq!(response.body.as_ref(), body.as_bytes());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_defaults_content_type_when_absent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/signals")
            .match_query(mockito::Matcher::UrlEncoded("symbol".into(), "AAPL".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = UpstreamClient::new(base(&server.url()), Duration::from_secs(5));
        let response = client.fetch("/signals", &symbol("AAPL")).await.unwrap();

        assert_eq!(response.content_type, DEFAULT_CONTENT_TYPE);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_sends_url_encoded_symbol() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/series")
            .match_query(mockito::Matcher::UrlEncoded("symbol".into(), "BRK B".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = UpstreamClient::new(base(&server.url()), Duration::from_secs(5));
        let response = client.fetch("/series", &symbol("BRK B")).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_error() {
        // Port 1 is privileged and nothing listens on it
        let client = UpstreamClient::new(base("http://127.0.0.1:1"), Duration::from_secs(1));
        let error = client.fetch("/series", &symbol("AAPL")).await.unwrap_err();

        assert!(matches!(error, TransportError::Connect(_)));
        assert!(!error.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_unresponsive_upstream_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept the connection but never answer
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(socket);
        });

        let client = UpstreamClient::new(
            base(&format!("http://{addr}")),
            Duration::from_millis(100),
        );
        let error = client.fetch("/series", &symbol("AAPL")).await.unwrap_err();

        assert!(matches!(error, TransportError::Timeout(_)));
    }
}
