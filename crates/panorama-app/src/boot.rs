//! Startup helpers: config, logging and the shared store.

use std::path::PathBuf;

use panorama_common::PanoramaError;
use panorama_config::PanoramaConfig;
use panorama_store::{FileStore, SharedStore};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

const DEFAULT_DIRECTIVE: &str = "panorama=info";

/// Load config from `--config` or the default location.
///
/// Returns defaults plus the error on failure, so the caller can report
/// it once logging is up.
pub fn load_config(args: &Args) -> (PanoramaConfig, Option<PanoramaError>) {
    let loaded = match &args.config {
        Some(path) => panorama_config::load_config_from(path),
        None => panorama_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (PanoramaConfig::default(), Some(e.into())),
    }
}

/// Install the global tracing subscriber. `--log-level` wins over the
/// config's `[logging]` level; `RUST_LOG` adds to either.
pub fn init_logging(args: &Args, config: &PanoramaConfig) {
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.directive());
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(env) if !env.is_empty() => format!("{env},{directive}"),
        _ => directive,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        )
        .init();
}

/// Store directory: `--store-dir`, then `[store] directory`, then the
/// platform data dir.
pub fn resolve_store_dir(args: &Args, config: &PanoramaConfig) -> Option<PathBuf> {
    args.store_dir
        .clone()
        .or_else(|| config.store.directory.clone())
        .or_else(|| dirs::data_dir().map(|d| d.join("panorama").join("store")))
}

/// Open the shared file store, wiping it first if asked.
pub fn open_store(dir: PathBuf, clear: bool) -> Result<FileStore, PanoramaError> {
    let store = FileStore::open(dir)?;
    if clear {
        store.clear()?;
        // Our own wipe is not news to us.
        store.drain_changes();
        tracing::info!("cleared shared store at {}", store.dir().display());
    }
    Ok(store)
}
