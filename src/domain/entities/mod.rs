pub mod alert_event;
pub mod reading;
pub mod snapshot;

pub use alert_event::AlertEvent;
pub use reading::Reading;
pub use snapshot::Snapshot;

/// Separator between per-channel messages in a persisted alert
pub const MESSAGE_SEPARATOR: &str = " | ";
