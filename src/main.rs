//! PlantPump Firmware — Main Entry Point
//!
//! Hexagonal architecture with a minute-resolution tick loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  Esp32TimeAdapter   LogEventSink     NvsAdapter              │
//! │  (ClockPort)        (EventSink)      (Config+StoragePort)    │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │           AlarmService (pure logic)                │      │
//! │  │  AlarmRegistry · alarm blob codec · SystemConfig   │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  PumpTrigger (AlarmDelegate — board layer actuates)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use plantpump::adapters::log_sink::LogEventSink;
use plantpump::adapters::nvs::NvsAdapter;
use plantpump::adapters::time::Esp32TimeAdapter;
use plantpump::alarm::WallClock;
use plantpump::app::commands::AppCommand;
use plantpump::app::ports::{AlarmDelegate, ClockPort, ConfigPort};
use plantpump::app::service::AlarmService;

// ── Pump trigger delegate ─────────────────────────────────────
//
// Bridges the registry (which knows nothing about hardware) to the
// irrigation pump.  GPIO/PWM actuation is wired by the board support
// layer; the trigger contract ends at this delegate.

struct PumpTrigger {
    watering_duration_secs: u16,
}

impl AlarmDelegate for PumpTrigger {
    fn on_alarm_fired(&mut self, name: &str, now: WallClock) {
        info!(
            "Pump trigger: '{}' at {:02}:{:02} — watering for {}s",
            name, now.hour, now.minute, self.watering_duration_secs
        );
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("PlantPump v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let mut nvs = NvsAdapter::new().map_err(|e| anyhow::anyhow!("NVS init failed: {}", e))?;
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            plantpump::config::SystemConfig::default()
        }
    };
    info!(
        "Time source: ntp={} tz={} (sync handled by platform layer)",
        config.ntp_server, config.timezone
    );

    // ── 3. Service construction & hydration ───────────────────
    let mut sink = LogEventSink::new();
    let mut pump = PumpTrigger {
        watering_duration_secs: config.watering_duration_secs,
    };
    let mut service = AlarmService::new(config);
    service.start(&nvs, &mut sink);

    // First boot: seed the stock watering schedule.
    if service.alarms().is_empty() {
        for (hour, minute, name) in [(7, 0, "Morning watering"), (12, 30, "Midday watering")] {
            let cmd = AppCommand::AddAlarm {
                hour,
                minute,
                name: name.to_string(),
            };
            if let Err(e) = service.handle_command(cmd, &mut nvs, &mut sink) {
                warn!("Seeding '{}' failed: {}", name, e);
            }
        }
    }

    // ── 4. Tick loop ──────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();

    if let Some(now) = clock.wall_clock() {
        for alarm in service.alarms() {
            let mins = alarm.minutes_until(now);
            if mins >= 0 {
                info!(
                    "Upcoming: {:02}:{:02} '{}' in {}h{:02}m",
                    alarm.hour,
                    alarm.minute,
                    alarm.name,
                    mins / 60,
                    mins % 60
                );
            }
        }
    } else {
        info!("Wall clock not yet synced; alarms idle until SNTP completes");
    }

    loop {
        let interval = u64::from(service.config().evaluate_interval_secs);
        thread::sleep(Duration::from_secs(interval));
        service.tick(clock.wall_clock(), &mut pump, &mut sink);
    }
}
