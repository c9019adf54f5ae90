//! Application service — the hexagonal core.
//!
//! [`AlarmService`] owns the alarm registry and the live configuration.
//! It is the spec'd "command layer": the single place where inbound
//! input is validated, where the registry is mutated, and where the
//! encoded alarm blob is written back to storage after every mutation.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!   ClockPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      AlarmService       │
//! StoragePort ◀──│  registry · codec · cfg │ ──▶ AlarmDelegate (pump)
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::alarm::registry::{clip_name, AlarmRegistry, WallClock};
use crate::alarm::store;
use crate::config::SystemConfig;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{
    AlarmDelegate, CommandError, ConfigPort, EventSink, StorageError, StoragePort,
};

/// NVS namespace for all PlantPump blobs.
pub const ALARM_NAMESPACE: &str = "plantpump";
/// Key of the encoded alarm list.
pub const ALARM_KEY: &str = "alarms";

/// How many alarms the startup read buffer accommodates.  The wire
/// format allows 65535 records, but a household watering schedule is a
/// handful; a blob beyond this cap loses its tail at hydration, the
/// same prefix policy the codec applies to truncation.
const MAX_STORED_ALARMS: usize = 100;

/// Startup read buffer: count field plus [`MAX_STORED_ALARMS`]
/// worst-case records (4-byte header + 31-byte name + NUL each).
const ALARM_BLOB_MAX: usize = 2 + MAX_STORED_ALARMS * 36;

/// The application service orchestrates all domain logic.
pub struct AlarmService {
    registry: AlarmRegistry,
    config: SystemConfig,
}

impl AlarmService {
    /// Construct the service from configuration with an empty registry.
    ///
    /// Does **not** touch storage — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            registry: AlarmRegistry::new(),
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Hydrate the registry from the persisted blob (if any) and emit
    /// the start event.  A missing or corrupted blob degrades to the
    /// longest decodable prefix, never to a startup failure.
    pub fn start(&mut self, storage: &impl StoragePort, sink: &mut impl EventSink) {
        let mut buf = [0u8; ALARM_BLOB_MAX];
        match storage.read(ALARM_NAMESPACE, ALARM_KEY, &mut buf) {
            Ok(len) => {
                let records = store::decode(&buf[..len]);
                info!(
                    "AlarmService: hydrated {} alarm(s) from {} byte blob",
                    records.len(),
                    len
                );
                self.registry.install(records);
            }
            Err(StorageError::NotFound) => {
                info!("AlarmService: no stored alarms, starting empty");
            }
            Err(e) => {
                warn!("AlarmService: alarm blob read failed ({}), starting empty", e);
            }
        }
        sink.emit(&AppEvent::Started {
            alarm_count: self.registry.len(),
        });
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from serial shell, BLE, etc.).
    ///
    /// This is the validation boundary the registry relies on: hour and
    /// minute are range-checked, names are trimmed and clipped to the
    /// wire bound, and config updates are range-checked before any of
    /// them take effect.  Successful mutations are persisted
    /// best-effort.
    ///
    /// The `store` parameter satisfies **both** [`StoragePort`] and
    /// [`ConfigPort`] — this avoids a double mutable borrow of the NVS
    /// adapter while keeping both port boundaries explicit.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        store: &mut (impl StoragePort + ConfigPort),
        sink: &mut impl EventSink,
    ) -> Result<(), CommandError> {
        match cmd {
            AppCommand::AddAlarm { hour, minute, name } => {
                if hour > 23 {
                    return Err(CommandError::InvalidHour);
                }
                if minute > 59 {
                    return Err(CommandError::InvalidMinute);
                }
                let name = clip_name(name.trim());
                if name.is_empty() {
                    return Err(CommandError::EmptyName);
                }
                self.registry.add(hour, minute, name);
                self.persist_alarms(store);
                sink.emit(&AppEvent::AlarmAdded {
                    name: name.to_string(),
                    hour,
                    minute,
                });
                Ok(())
            }

            AppCommand::DeleteAlarm { name } => {
                let removed = self.registry.delete_by_name(&name);
                if removed {
                    self.persist_alarms(store);
                }
                sink.emit(&AppEvent::AlarmDeleted { name, removed });
                Ok(())
            }

            AppCommand::UpdateConfig(new_config) => {
                new_config.validate().map_err(CommandError::InvalidConfig)?;
                self.config = new_config;
                // Best-effort like the alarm blob: a failed save costs
                // persistence across the next reboot, not the running
                // config.
                if let Err(e) = store.save(&self.config) {
                    warn!("AlarmService: config save failed ({})", e);
                }
                info!("AlarmService: configuration updated at runtime");
                sink.emit(&AppEvent::ConfigUpdated);
                Ok(())
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Evaluate one clock sample.
    ///
    /// `now` is `None` while the wall clock is unsynced; the tick is
    /// skipped (alarms stay armed).  Each fire goes to both the caller's
    /// delegate (pump trigger) and the event sink (structured log).
    pub fn tick(
        &mut self,
        now: Option<WallClock>,
        delegate: &mut dyn AlarmDelegate,
        sink: &mut impl EventSink,
    ) {
        let Some(now) = now else {
            return;
        };
        let mut forwarding = ForwardingDelegate {
            inner: delegate,
            sink,
        };
        self.registry.evaluate(now, &mut forwarding);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only view of the alarms in insertion order.
    pub fn alarms(&self) -> &[crate::alarm::AlarmRecord] {
        self.registry.alarms()
    }

    /// The live configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Write the encoded alarm list back to storage.  Best-effort: a
    /// failed save costs persistence across the next reboot, not the
    /// running registry, so it is logged and swallowed.
    fn persist_alarms(&self, storage: &mut impl StoragePort) {
        let blob = store::encode(self.registry.alarms());
        if let Err(e) = storage.write(ALARM_NAMESPACE, ALARM_KEY, &blob) {
            warn!("AlarmService: alarm save failed ({})", e);
        }
    }
}

/// Fans one fire out to the pump delegate and the event sink.
struct ForwardingDelegate<'a, S: EventSink> {
    inner: &'a mut dyn AlarmDelegate,
    sink: &'a mut S,
}

impl<S: EventSink> AlarmDelegate for ForwardingDelegate<'_, S> {
    fn on_alarm_fired(&mut self, name: &str, now: WallClock) {
        info!("ALARM TRIGGERED [{:02}:{:02}]: {}", now.hour, now.minute, name);
        self.sink.emit(&AppEvent::AlarmFired {
            name: name.to_string(),
            hour: now.hour,
            minute: now.minute,
        });
        self.inner.on_alarm_fired(name, now);
    }
}
