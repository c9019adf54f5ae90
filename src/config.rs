//! System configuration parameters
//!
//! All tunable parameters for the PlantPump system.  Values can be
//! overridden via NVS (non-volatile storage) or the remote shell.  Time
//! synchronization itself happens outside this crate — the NTP server
//! and timezone are carried here so the platform time layer can consume
//! them.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Time source ---
    /// NTP server hostname handed to the platform SNTP layer
    pub ntp_server: String,
    /// POSIX TZ string (e.g. "CET-1CEST,M3.5.0,M10.5.0/3")
    pub timezone: String,

    // --- Scheduling ---
    /// Alarm evaluation interval (seconds); one tick per interval
    pub evaluate_interval_secs: u32,
    /// Pump run time when an alarm fires (seconds)
    pub watering_duration_secs: u16,
}

/// Longest accepted hostname / TZ string in config.
pub const MAX_CONFIG_STR: usize = 64;

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ntp_server: "pool.ntp.org".to_string(),
            timezone: "CET-1CEST,M3.5.0,M10.5.0/3".to_string(),

            // One evaluation per minute — alarms have minute resolution,
            // so anything faster only burns power.
            evaluate_interval_secs: 60,
            watering_duration_secs: 20,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Shared by the command layer (runtime
    /// updates) and the NVS adapter (persistence) so a bad config can
    /// neither take effect nor reach flash.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.ntp_server.is_empty() || self.ntp_server.len() > MAX_CONFIG_STR {
            return Err("ntp_server must be 1–64 bytes");
        }
        if self.timezone.is_empty() || self.timezone.len() > MAX_CONFIG_STR {
            return Err("timezone must be 1–64 bytes");
        }
        // Alarms have minute resolution; a slower tick can skip a minute.
        if !(1..=60).contains(&self.evaluate_interval_secs) {
            return Err("evaluate_interval_secs must be 1–60");
        }
        if !(1..=600).contains(&self.watering_duration_secs) {
            return Err("watering_duration_secs must be 1–600");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(!c.ntp_server.is_empty());
        assert!(!c.timezone.is_empty());
        assert!(c.evaluate_interval_secs > 0 && c.evaluate_interval_secs <= 60);
        assert!(c.watering_duration_secs > 0);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = SystemConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: SystemConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.ntp_server, c2.ntp_server);
        assert_eq!(c.timezone, c2.timezone);
        assert_eq!(c.evaluate_interval_secs, c2.evaluate_interval_secs);
        assert_eq!(c.watering_duration_secs, c2.watering_duration_secs);
    }

    #[test]
    fn default_config_validates() {
        assert_eq!(SystemConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let mut c = SystemConfig::default();
        c.evaluate_interval_secs = 0;
        assert!(c.validate().is_err());

        let mut c = SystemConfig::default();
        c.ntp_server.clear();
        assert!(c.validate().is_err());

        let mut c = SystemConfig::default();
        c.timezone = "x".repeat(MAX_CONFIG_STR + 1);
        assert!(c.validate().is_err());

        let mut c = SystemConfig::default();
        c.watering_duration_secs = 601;
        assert!(c.validate().is_err());
    }

    #[test]
    fn evaluation_is_at_least_minute_resolution() {
        let c = SystemConfig::default();
        assert!(
            c.evaluate_interval_secs <= 60,
            "an interval above one minute can skip an alarm's scheduled minute"
        );
    }
}
