//! Path, header and error-label constants for the gateway
//!
//! Centralized so the route table, the clients and the tests all agree
//! on the same strings.

/// Header name for request ID used for tracing and correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Public paths served by the gateway
pub mod paths {
    /// Liveness probe endpoint
    pub const HEALTH: &str = "/healthz";

    /// Proxied price-series endpoint
    pub const SERIES: &str = "/api/series";

    /// Proxied indicator endpoint
    pub const SIGNALS: &str = "/api/signals";
}

/// Relative paths on the upstream services
pub mod upstream_paths {
    pub const SERIES: &str = "/series";
    pub const SIGNALS: &str = "/signals";
}

/// Fixed per-route labels used in 502 envelopes
pub mod error_labels {
    pub const PRICING_UNAVAILABLE: &str = "pricing service unavailable";
    pub const ML_UNAVAILABLE: &str = "ml service unavailable";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_follow_conventions() {
        assert!(X_REQUEST_ID.starts_with("x-"));

        assert!(paths::HEALTH.starts_with('/'));
        assert!(paths::SERIES.starts_with("/api/"));
        assert!(paths::SIGNALS.starts_with("/api/"));

        assert!(upstream_paths::SERIES.starts_with('/'));
        assert!(upstream_paths::SIGNALS.starts_with('/'));

        // The labels are part of the wire contract with the client
        assert_eq!(error_labels::PRICING_UNAVAILABLE, "pricing service unavailable");
        assert_eq!(error_labels::ML_UNAVAILABLE, "ml service unavailable");
    }
}
