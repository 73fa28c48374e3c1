//! Headless host for the amoeba world.
//!
//! Paces ticks on a timer, stops on Ctrl+C or SIGTERM, and reseeds the
//! world on SIGHUP. Pass a JSON config path as the first argument.

mod telemetry;

use amoeba_core::SimulationConfig;
use amoeba_world::{TickOutcome, World};
use anyhow::{Context, Result};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => SimulationConfig::default(),
    };
    info!(config = %serde_json::to_string(&config)?, "Starting amoeba world");

    let mut world = World::new(config)?;

    let max_ticks = world.config().max_ticks;
    if world.config().tick_millis == 0 {
        if let Some(ticks) = max_ticks {
            let stats = world.run(ticks)?;
            info!(?stats, "Run complete");
            return Ok(());
        }
        warn!("tick_millis is 0 without max_ticks; pacing at 1 ms");
    }

    run_paced(&mut world).await?;

    info!(
        ticks = world.tick_count(),
        stats = ?world.stats(),
        "Shutting down"
    );
    Ok(())
}

async fn run_paced(world: &mut World) -> Result<()> {
    let millis = world.config().tick_millis.max(1);
    let max_ticks = world.config().max_ticks;
    let mut ticker = interval(Duration::from_millis(millis));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    #[cfg(unix)]
    let mut hangup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
        .context("installing SIGHUP handler")?;

    loop {
        #[cfg(unix)]
        let reset = hangup.recv();
        #[cfg(not(unix))]
        let reset = std::future::pending::<Option<()>>();

        tokio::select! {
            _ = &mut shutdown => break,
            _ = reset => {
                info!("Reset requested by host");
                world.request_reset();
            }
            _ = ticker.tick() => {
                if let TickOutcome::Reset(reason) = world.tick()? {
                    info!(?reason, tick = world.tick_count(), "World reinitialized");
                }
                if max_ticks.is_some_and(|max| world.tick_count() >= max) {
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
