use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub upstreams: UpstreamSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub pricing_base_url: String,
    pub ml_base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 3001)?
            .set_default("application.environment", environment.clone())?
            .set_default("upstreams.pricing_base_url", "http://svc-pricing-go:8080")?
            .set_default("upstreams.ml_base_url", "http://svc-ml-py:8000")?
            .set_default("upstreams.request_timeout_secs", 20)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("CHARTFEED").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Upper bound on a single upstream call, connect time included.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstreams.request_timeout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}
