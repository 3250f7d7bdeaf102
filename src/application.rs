use crate::config::Settings;
use crate::gateway::GatewayService;
use crate::Result;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Main application struct that coordinates startup and serving
pub struct Application {
    settings: Settings,
}

impl Application {
    pub fn new() -> Result<Self> {
        let settings = Settings::new()?;
        Ok(Self { settings })
    }

    /// Bind the listener and serve until the process is stopped.
    ///
    /// A failed bind is fatal: the error propagates out and the process
    /// exits instead of running without a listener.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<()> {
        let service = GatewayService::from_settings(&self.settings)?;
        let addr = self.settings.listen_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(
            pricing = %self.settings.upstreams.pricing_base_url,
            ml = %self.settings.upstreams.ml_base_url,
            "chartfeed gateway listening on {addr}"
        );

        axum::serve(listener, service.into_router()).await?;

        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
