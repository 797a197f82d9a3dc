pub mod clock;
pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use clock::{Clock, DayClock, ManualClock};
pub use errors::{ConfigError, PanoramaError, StoreError};
pub use events::{Event, EventBus};
pub use id::{new_claim_token, new_short_id};
pub use types::{Shape, SurfaceId, Vec2};

pub type Result<T> = std::result::Result<T, PanoramaError>;
