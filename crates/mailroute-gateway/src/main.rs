//! mailroute gateway
//!
//! - Management API: /api/email/list, /api/email/{recipient}
//! - Inbound routing: POST /v1/route
//! - Ops: /healthz, /metrics

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use mailroute_core::error::Result;
use mailroute_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "mailroute-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "mailroute-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| mailroute_core::MailRouteError::Internal(format!("bind failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| mailroute_core::MailRouteError::Internal(format!("server failed: {e}")))
}
