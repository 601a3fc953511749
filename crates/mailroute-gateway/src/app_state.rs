//! Shared application state for the mailroute gateway.

use std::sync::Arc;

use mailroute_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::obs::GatewayMetrics;
use crate::store::{ConfigStore, InMemoryConfigStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<dyn ConfigStore>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    api_token: Option<String>,
}

impl AppState {
    /// Build state from config: in-memory store (seeded if configured) and
    /// the bearer token read from the configured environment variable.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let store = InMemoryConfigStore::new();
        if let Some(path) = &cfg.store.seed_path {
            let n = store.seed_from_file(path)?;
            tracing::info!(%path, routes = n, "policy store seeded");
        }
        let api_token = cfg.api.auth_token();
        if api_token.is_none() {
            tracing::warn!(
                env = %cfg.api.auth_token_env,
                "no API token set; management and routing endpoints will refuse all requests"
            );
        }
        Ok(Self::with_store(cfg, Arc::new(store), api_token))
    }

    /// Build state around an existing store.
    pub fn with_store(cfg: GatewayConfig, store: Arc<dyn ConfigStore>, api_token: Option<String>) -> Self {
        let metrics = Arc::new(GatewayMetrics::default());
        let dispatcher = Dispatcher::new(Arc::clone(&store), Arc::clone(&metrics));
        Self {
            inner: Arc::new(AppStateInner { cfg, api_token }),
            store,
            dispatcher: Arc::new(dispatcher),
            metrics,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn api_token(&self) -> Option<&str> {
        self.inner.api_token.as_deref()
    }

    pub fn store(&self) -> Arc<dyn ConfigStore> {
        Arc::clone(&self.store)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }
}
