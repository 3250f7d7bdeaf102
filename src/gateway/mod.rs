//! Gateway module: request routing and upstream mediation
//!
//! Each public endpoint maps to exactly one upstream call. The gateway
//! shapes status codes, content types and its own error envelopes;
//! upstream payloads are forwarded byte-for-byte, never parsed.

pub mod client;
pub mod error_response;
pub mod headers;
pub mod middleware;
pub mod service;
pub mod types;


pub use client::UpstreamClient;
pub use error_response::ErrorEnvelope;
pub use service::GatewayService;
pub use types::{
    GatewayError, GatewayResult, Symbol, TransportError, UpstreamBaseUrl, UpstreamResponse,
};
