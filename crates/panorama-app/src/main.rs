mod boot;
mod cli;
mod host;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use panorama_common::{DayClock, Shape};
use serde_json::json;
use tokio::time::MissedTickBehavior;

use host::{PanoramaHost, SimulatedWindow};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = cli::parse();

    let (config, config_err) = boot::load_config(&args);
    boot::init_logging(&args, &config);

    tracing::info!("Panorama v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_err {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if args.print_config {
        println!("{}", panorama_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let Some(store_dir) = boot::resolve_store_dir(&args, &config) else {
        tracing::error!("No store directory available; pass --store-dir");
        return ExitCode::FAILURE;
    };
    let store = match boot::open_store(store_dir, args.clear) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open shared store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let window = SimulatedWindow::new(
        Shape::new(args.x, args.y, args.width, args.height),
        args.drift.unwrap_or_default(),
    );
    let mut host = PanoramaHost::new(&config, store, window, Arc::new(DayClock::new()));
    host.start(json!({
        "pid": std::process::id(),
        "version": env!("CARGO_PKG_VERSION"),
    }));

    let mut events = host.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!(?event, "host event");
        }
    });

    let period = Duration::from_secs_f64(1.0 / f64::from(config.host.tick_rate_hz.max(1)));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frames: u64 = 0;
    tracing::info!("Entering tick loop at {} Hz", config.host.tick_rate_hz);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                break;
            }
            _ = interval.tick() => {
                host.poll_store();
                host.frame();
                frames += 1;
                if args.ticks.is_some_and(|limit| frames >= limit) {
                    break;
                }
            }
        }
    }

    tracing::info!(
        windows = host.registry().windows().len(),
        planes = host.scene().planes().len(),
        shape = %host.window().shape(),
        gathered = host.is_gathered(),
        "Stopping"
    );
    host.shutdown();
    tracing::info!("Shutdown complete after {frames} frames");
    ExitCode::SUCCESS
}
