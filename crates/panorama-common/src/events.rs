use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{Shape, SurfaceId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    SurfaceClaimed(SurfaceId),
    WindowsChanged(Vec<SurfaceId>),
    ShapeChanged(Shape),
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn sender(&self) -> broadcast::Sender<Event> {
        self.sender.clone()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::SurfaceClaimed(SurfaceId(0)));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::SurfaceClaimed(SurfaceId(0))));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[tokio::test]
    async fn cloned_sender_reaches_subscribers() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let tx = bus.sender();

        tx.send(Event::WindowsChanged(vec![SurfaceId(0), SurfaceId(1)]))
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::WindowsChanged(ref ids) if ids.len() == 2));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn shape_event_round_trips() {
        let event = Event::ShapeChanged(Shape::new(10, 20, 300, 400));
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Event::ShapeChanged(s) if s == Shape::new(10, 20, 300, 400)));
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
