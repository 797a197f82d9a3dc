//! Directory watcher feeding raw file events to a [`super::FileStore`].

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use panorama_common::StoreError;
use tracing::{debug, error};

/// Watch `dir` and forward the paths of created, modified and removed
/// files over `tx`. The returned watcher must be kept alive.
pub(crate) fn watch_dir(dir: &Path, tx: Sender<PathBuf>) -> Result<RecommendedWatcher, StoreError> {
    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                let relevant = matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                );
                if !relevant {
                    return;
                }
                for path in event.paths {
                    debug!("store file event: {}", path.display());
                    // Receiver gone means the store was dropped.
                    let _ = tx.send(path);
                }
            }
            Err(e) => {
                error!("store watcher error: {e}");
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| StoreError::Io(format!("failed to create watcher: {e}")))?;

    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|e| StoreError::Io(format!("failed to watch {}: {e}", dir.display())))?;

    Ok(watcher)
}
