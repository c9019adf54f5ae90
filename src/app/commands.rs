//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial shell,
//! BLE, remote CLI) that the [`AlarmService`](super::service::AlarmService)
//! validates and acts upon.  The transports themselves live outside this
//! crate's core; only their contract does.

use crate::config::SystemConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Add a daily watering alarm.  Hour/minute ranges and name length
    /// are validated by the service, not by the caller.
    AddAlarm { hour: u8, minute: u8, name: String },

    /// Delete the first alarm with this exact name.
    DeleteAlarm { name: String },

    /// Hot-reload configuration (e.g. new NTP server or timezone).
    UpdateConfig(SystemConfig),
}
