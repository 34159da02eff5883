//! Configuration module
//!
//! Handles CLI configuration: catalog connection and the feature limits the
//! deployment flow enforces.

use std::time::Duration;
use tessera_client::{CatalogClient, FlowSettings};
use tessera_core::schedule::parse_schedule_options;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the catalog server
    pub server_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Raw schedule options from the feature limits (e.g. "daily,weekly")
    pub schedule_options: Vec<String>,

    /// Whether feature limits are enforced
    pub limits_enabled: bool,

    /// How long the deploy overlay stays up after a deploy settles
    pub overlay_dismiss_delay: Duration,
}

impl Config {
    /// Creates a configuration with defaults
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            token: None,
            schedule_options: Vec::new(),
            limits_enabled: false,
            overlay_dismiss_delay: Duration::from_millis(500),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_schedule_options(mut self, options: Vec<String>) -> Self {
        self.schedule_options = options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        self
    }

    pub fn with_limits(mut self, enabled: bool) -> Self {
        self.limits_enabled = enabled;
        self
    }

    pub fn with_overlay_delay_ms(mut self, millis: u64) -> Self {
        self.overlay_dismiss_delay = Duration::from_millis(millis);
        self
    }

    /// Builds an authenticated catalog client
    pub fn client(&self) -> CatalogClient {
        let client = CatalogClient::new(&self.server_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }

    /// Settings handed to the deployment flow
    pub fn flow_settings(&self) -> anyhow::Result<FlowSettings> {
        let schedule_options = if self.schedule_options.is_empty() {
            None
        } else {
            Some(parse_schedule_options(&self.schedule_options)?)
        };

        Ok(FlowSettings {
            schedule_options,
            limits_enabled: self.limits_enabled,
            overlay_dismiss_delay: self.overlay_dismiss_delay,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_url.is_empty() {
            anyhow::bail!("server_url cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        parse_schedule_options(&self.schedule_options)
            .map_err(|e| anyhow::anyhow!("invalid schedule options: {}", e))?;

        Ok(())
    }
}
