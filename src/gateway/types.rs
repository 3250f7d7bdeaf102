//! Type definitions for the gateway module

use bytes::Bytes;
use http::{HeaderValue, StatusCode};
use nutype::nutype;
use std::time::Duration;
use thiserror::Error;

/// Tradable-instrument identifier as supplied by the client.
///
/// Case is preserved exactly as received; only the empty string is
/// rejected.
#[nutype(
    derive(Clone, Debug, Display, TryFrom, AsRef),
    validate(predicate = |s: &str| !s.is_empty()),
)]
pub struct Symbol(String);

/// Base URL of an upstream service, fixed at startup
#[nutype(
    derive(Clone, Debug, Display, TryFrom, AsRef),
    validate(predicate = |s: &str| s.starts_with("http://") || s.starts_with("https://")),
)]
pub struct UpstreamBaseUrl(String);

/// Raw upstream reply: status, declared content type and body bytes,
/// untouched by the gateway
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

/// Failure to complete an HTTP exchange with an upstream, as opposed to
/// the upstream answering with an error status
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid upstream URI: {0}")]
    InvalidUri(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read upstream body: {0}")]
    Body(String),
}

/// Errors the gateway answers for itself
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("missing symbol")]
    MissingSymbol,

    #[error("{label}: {detail}")]
    UpstreamUnavailable { label: &'static str, detail: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_rejects_empty_string() {
        assert!(Symbol::try_new(String::new()).is_err());
    }

    #[test]
    fn test_symbol_preserves_case() {
        let symbol = Symbol::try_new("aApL".to_string()).unwrap();
        assert_eq!(symbol.as_ref(), "aApL");
    }

    #[test]
    fn test_symbol_accepts_punctuation() {
        // Class shares arrive as e.g. BRK.B
        assert!(Symbol::try_new("BRK.B".to_string()).is_ok());
    }

    #[test]
    fn test_base_url_requires_http_scheme() {
        assert!(UpstreamBaseUrl::try_new("http://svc-pricing-go:8080".to_string()).is_ok());
        assert!(UpstreamBaseUrl::try_new("https://pricing.internal".to_string()).is_ok());
        assert!(UpstreamBaseUrl::try_new("svc-pricing-go:8080".to_string()).is_err());
        assert!(UpstreamBaseUrl::try_new("ftp://pricing".to_string()).is_err());
    }

    #[test]
    fn test_transport_error_descriptions_are_non_empty() {
        let errors = [
            TransportError::InvalidUri("http://".to_string()),
            TransportError::Connect("connection refused".to_string()),
            TransportError::Timeout(Duration::from_secs(20)),
            TransportError::Body("unexpected EOF".to_string()),
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
