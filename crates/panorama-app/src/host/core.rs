use std::sync::Arc;

use panorama_common::{Clock, Event, EventBus};
use panorama_config::PanoramaConfig;
use panorama_registry::SurfaceRegistry;
use panorama_scene::SceneModel;
use panorama_store::SharedStore;
use serde_json::Value;
use tokio::sync::broadcast;

use super::window::SimulatedWindow;

const EVENT_CAPACITY: usize = 64;

pub struct PanoramaHost {
    pub(super) registry: SurfaceRegistry,
    pub(super) scene: SceneModel,
    pub(super) window: SimulatedWindow,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) events: EventBus,
    pub(super) event_rx: broadcast::Receiver<Event>,
    pub(super) gather_threshold: f64,
    /// Last observed result of the gather check, to log transitions only.
    pub(super) gathered: bool,
}

impl PanoramaHost {
    pub fn new(
        config: &PanoramaConfig,
        store: impl SharedStore + 'static,
        window: SimulatedWindow,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let events = EventBus::new(EVENT_CAPACITY);
        let event_rx = events.subscribe();

        let mut registry = SurfaceRegistry::new(store, window.shape_handle(), &config.registry);

        let tx = events.sender();
        registry.set_windows_changed_callback(move |windows| {
            let ids = windows.iter().map(|w| w.id).collect();
            let _ = tx.send(Event::WindowsChanged(ids));
        });
        let tx = events.sender();
        registry.set_shape_changed_callback(move |shape| {
            let _ = tx.send(Event::ShapeChanged(*shape));
        });

        Self {
            registry,
            scene: SceneModel::new(config.scene.clone()),
            window,
            clock,
            events,
            event_rx,
            gather_threshold: config.scene.gather_threshold,
            gathered: false,
        }
    }

    /// Join the shared scene and place the world under this window.
    pub fn start(&mut self, metadata: Value) {
        self.registry.init(metadata);
        if let Some(id) = self.registry.this_id() {
            self.events.publish(Event::SurfaceClaimed(id));
        }

        let origin = self.window.shape().origin();
        self.scene.set_offset_target(origin.x, origin.y, false);
        self.apply_events();
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn window(&self) -> &SimulatedWindow {
        &self.window
    }

    /// Extra listener for host events (claims, list changes, shutdown).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}
