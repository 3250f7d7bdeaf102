//! Chartfeed Gateway - the API gateway in front of the chart services
//!
//! A browser client asks this gateway for a symbol's price history and
//! derived indicators; the gateway maps each public endpoint to exactly
//! one upstream service and forwards the reply verbatim. It owns no data
//! and computes nothing itself.

pub mod application;
pub mod config;
pub mod error;
pub mod gateway;

pub use application::Application;
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        // Basic smoke test to ensure the library compiles and basic types work
        let result: Result<()> = Ok(());
        assert!(result.is_ok());
    }
}
