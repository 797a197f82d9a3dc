use panorama_common::Event;
use tracing::info;

use super::core::PanoramaHost;

impl PanoramaHost {
    /// Leave the shared scene. Safe to call more than once.
    pub fn shutdown(&mut self) {
        info!(id = ?self.registry.this_id(), "leaving shared scene");
        self.registry.shutdown();
        self.events.publish(Event::Shutdown);
        self.apply_events();
        self.scene.rebuild(&[]);
    }
}
