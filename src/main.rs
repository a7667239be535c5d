use std::sync::Arc;

use anyhow::Result;
use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

use hostaway_slack_bridge::{AppState, BridgeConfig, SlackClient, build_router, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::install("hostaway-slack-bridge")?;

    let config = BridgeConfig::from_env()?;
    let notifier = Arc::new(SlackClient::new(reqwest::Client::new(), &config));
    let router = build_router(AppState {
        config: config.clone(),
        notifier,
    });

    let listener = TcpListener::bind(config.addr).await?;
    info!("hostaway-slack-bridge listening on {}", config.addr);

    serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
