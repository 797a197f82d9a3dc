//! Per-frame driving and event application.

use panorama_common::Event;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, warn};

use super::core::PanoramaHost;

impl PanoramaHost {
    /// One frame: move the window, tick the registry, step the scene.
    pub fn frame(&mut self) {
        self.window.advance();
        self.registry.update();
        self.apply_events();

        let t = self.clock.now_secs();
        self.scene.step(self.registry.windows(), t);
        self.check_gathered();
    }

    /// Pick up store changes made by other windows since the last frame.
    pub fn poll_store(&mut self) {
        if self.registry.process_external_changes() {
            self.apply_events();
        }
    }

    pub(super) fn apply_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(Event::WindowsChanged(ids)) => {
                    info!(?ids, index = ?self.registry.this_index(), "windows changed");
                    self.scene.rebuild(self.registry.windows());
                }
                Ok(Event::ShapeChanged(shape)) => {
                    debug!(%shape, "window moved");
                    let origin = shape.origin();
                    self.scene.set_offset_target(origin.x, origin.y, true);
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => {
                    // The registry holds the current truth; resync from it.
                    warn!(missed, "host event queue lagged, resyncing scene");
                    self.scene.rebuild(self.registry.windows());
                    let origin = self.window.shape().origin();
                    self.scene.set_offset_target(origin.x, origin.y, true);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    fn check_gathered(&mut self) {
        let gathered =
            self.scene.planes().len() > 1 && self.scene.planes_gathered(self.gather_threshold);
        if gathered != self.gathered {
            if gathered {
                info!(planes = self.scene.planes().len(), "planes gathered");
            } else {
                debug!("planes scattered");
            }
            self.gathered = gathered;
        }
    }

    pub fn is_gathered(&self) -> bool {
        self.gathered
    }
}
