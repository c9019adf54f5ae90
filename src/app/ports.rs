//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (clock, storage, event sinks, pump trigger) implement
//! these traits.  The [`AlarmService`](super::service::AlarmService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::alarm::registry::WallClock;
use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: platform clock → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the tick loop samples wall-clock time through this.
pub trait ClockPort {
    /// Current local time-of-day, or `None` while the wall clock is not
    /// yet trustworthy (e.g. before the external NTP sync completes).
    fn wall_clock(&self) -> Option<WallClock>;
}

// ───────────────────────────────────────────────────────────────
// Alarm delegate (decouples the registry from the event system)
// ───────────────────────────────────────────────────────────────

/// Callback trait invoked synchronously when an alarm fires.
///
/// The main loop implements this by actuating the irrigation pump, but
/// the registry itself knows nothing about GPIO, events, or queues.
/// Implementations must not block indefinitely and must not mutate the
/// registry they were called from.
pub trait AlarmDelegate {
    /// Called once per fire with the alarm's label and the clock sample
    /// that matched it.
    fn on_alarm_fired(&mut self, name: &str, now: WallClock);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, BLE
/// characteristic, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value blob storage.
///
/// Keys are namespaced to prevent collisions between subsystems, and
/// write operations are atomic — the ESP-IDF NVS API guarantees this
/// natively; the in-memory simulation achieves it trivially.  The alarm
/// blob's tolerance to torn or truncated values is handled one layer up,
/// in the codec.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting and
/// reject invalid ranges with [`ConfigError::ValidationFailed`] rather
/// than silently clamping them.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`AlarmService::handle_command`](super::service::AlarmService::handle_command).
///
/// The registry itself never rejects input; range and name validation
/// is the command layer's responsibility, and these are its verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Hour outside 0–23.
    InvalidHour,
    /// Minute outside 0–59.
    InvalidMinute,
    /// Alarm name empty after trimming.
    EmptyName,
    /// A config field failed range validation.
    InvalidConfig(&'static str),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidHour => write!(f, "hour must be 0-23"),
            Self::InvalidMinute => write!(f, "minute must be 0-59"),
            Self::EmptyName => write!(f, "alarm name must not be empty"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}
