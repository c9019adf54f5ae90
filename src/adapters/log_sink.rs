//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { alarm_count } => {
                info!("START | {} alarm(s) loaded", alarm_count);
            }
            AppEvent::AlarmFired { name, hour, minute } => {
                info!("ALARM | {:02}:{:02} '{}' fired", hour, minute, name);
            }
            AppEvent::AlarmAdded { name, hour, minute } => {
                info!("SCHED | added {:02}:{:02} '{}'", hour, minute, name);
            }
            AppEvent::AlarmDeleted { name, removed } => {
                if *removed {
                    info!("SCHED | deleted '{}'", name);
                } else {
                    info!("SCHED | delete miss for '{}'", name);
                }
            }
            AppEvent::ConfigUpdated => {
                info!("CONF  | configuration updated");
            }
        }
    }
}
