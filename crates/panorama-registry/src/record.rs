use panorama_common::{Shape, SurfaceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a participant publishes under its directory key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRecord {
    pub id: SurfaceId,
    /// Identifies this claim of `id`; a foreign token under our key means
    /// another participant took the id.
    pub token: String,
    /// Heartbeat, bumped by the owner every tick.
    pub beat: u64,
    pub shape: Shape,
    #[serde(default)]
    pub metadata: Value,
}

impl SurfaceRecord {
    pub fn to_surface(&self) -> Surface {
        Surface {
            id: self.id,
            shape: self.shape,
            metadata: self.metadata.clone(),
        }
    }
}

/// One entry of the reconciled window list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub id: SurfaceId,
    pub shape: Shape,
    pub metadata: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_json_layout() {
        let record = SurfaceRecord {
            id: SurfaceId(2),
            token: "t".into(),
            beat: 9,
            shape: Shape::new(1, 2, 3, 4),
            metadata: json!({"foo": "bar"}),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 2,
                "token": "t",
                "beat": 9,
                "shape": {"x": 1, "y": 2, "w": 3, "h": 4},
                "metadata": {"foo": "bar"}
            })
        );
    }

    #[test]
    fn missing_metadata_defaults_to_null() {
        let record: SurfaceRecord = serde_json::from_str(
            r#"{"id":0,"token":"t","beat":0,"shape":{"x":0,"y":0,"w":1,"h":1}}"#,
        )
        .unwrap();
        assert_eq!(record.metadata, Value::Null);
    }

    #[test]
    fn to_surface_drops_bookkeeping() {
        let record = SurfaceRecord {
            id: SurfaceId(5),
            token: "t".into(),
            beat: 100,
            shape: Shape::new(0, 0, 640, 480),
            metadata: json!({"k": 1}),
        };
        let surface = record.to_surface();
        assert_eq!(surface.id, SurfaceId(5));
        assert_eq!(surface.shape, record.shape);
        assert_eq!(surface.metadata, json!({"k": 1}));
    }
}
