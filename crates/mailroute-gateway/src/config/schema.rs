use std::net::SocketAddr;

use serde::Deserialize;
use mailroute_core::error::{MailRouteError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MailRouteError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.api.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            MailRouteError::BadRequest(format!(
                "gateway.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Management API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Environment variable holding the bearer token.
    #[serde(default = "default_auth_token_env")]
    pub auth_token_env: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            auth_token_env: default_auth_token_env(),
        }
    }
}

impl ApiSection {
    pub fn validate(&self) -> Result<()> {
        if self.auth_token_env.trim().is_empty() {
            return Err(MailRouteError::BadRequest(
                "api.auth_token_env must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Token from the configured environment variable; empty counts as unset.
    pub fn auth_token(&self) -> Option<String> {
        std::env::var(&self.auth_token_env)
            .ok()
            .filter(|t| !t.is_empty())
    }
}

fn default_auth_token_env() -> String {
    "MAILROUTE_API_TOKEN".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// JSON object `{recipient: document}` loaded at startup.
    #[serde(default)]
    pub seed_path: Option<String>,
}
