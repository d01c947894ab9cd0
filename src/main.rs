//! Fireline engine binary entrypoint wiring the match engine, the event
//! pump, and the status publisher together.

use tokio::sync::mpsc;
use tracing::{info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fireline_engine::config::AppConfig;
use fireline_engine::services::publisher::{BusMessage, run_status_publisher};
use fireline_engine::state::{MatchEngine, run_event_pump};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load()?;
    let engine = MatchEngine::new(config.engine);

    tokio::spawn(run_event_pump(engine.clone()));

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_status_publisher(engine.clone(), outbound_tx));
    tokio::spawn(drain_outbound(outbound_rx));

    info!("match engine running");
    shutdown_signal().await;
    info!("shutting down");

    Ok(())
}

/// Consume outbound messages where the bus transport would attach.
async fn drain_outbound(mut rx: mpsc::UnboundedReceiver<BusMessage>) {
    while let Some(msg) = rx.recv().await {
        trace!(topic = %msg.topic, "outbound");
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the engine down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
