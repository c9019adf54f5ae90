//! Outbound application events.
//!
//! The [`AlarmService`](super::service::AlarmService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them — log to serial, publish over
//! a future telemetry channel, etc.

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries hydrated alarm count).
    Started { alarm_count: usize },

    /// An alarm fired at its scheduled time.
    AlarmFired { name: String, hour: u8, minute: u8 },

    /// An alarm was added through the command layer.
    AlarmAdded { name: String, hour: u8, minute: u8 },

    /// A delete-by-name command completed; `removed` is false on a miss.
    AlarmDeleted { name: String, removed: bool },

    /// The runtime configuration was replaced.
    ConfigUpdated,
}
