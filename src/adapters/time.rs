//! ESP32 time adapter.
//!
//! Implements [`ClockPort`] for the PlantPump system.
//!
//! - **`target_os = "espidf"`** — reads the system wall clock
//!   (`gettimeofday` + `localtime_r`, timezone applied via the `TZ`
//!   environment the platform time layer sets up).  Time before the
//!   external SNTP sync completes is reported as `None`.
//! - **`not(target_os = "espidf")`** — host builds have no meaningful
//!   device wall clock; always `None`.  Tests drive the service with
//!   explicit [`WallClock`](crate::alarm::WallClock) samples instead.

use crate::alarm::registry::WallClock;
use crate::app::ports::ClockPort;

/// Clock adapter for the ESP32 platform.
pub struct Esp32TimeAdapter;

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for Esp32TimeAdapter {
    #[cfg(target_os = "espidf")]
    fn wall_clock(&self) -> Option<WallClock> {
        use core::ptr;

        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
            return None;
        }
        // Reject obviously unsynced time (e.g. before 2020-01-01)
        const EPOCH_2020: i64 = 1_577_836_800;
        if tv.tv_sec < EPOCH_2020 {
            return None;
        }
        let secs = tv.tv_sec as esp_idf_svc::sys::time_t;
        let mut tm: esp_idf_svc::sys::tm = unsafe { core::mem::zeroed() };
        if unsafe { esp_idf_svc::sys::localtime_r(&secs, &mut tm) }.is_null() {
            return None;
        }
        if !(0..=23).contains(&tm.tm_hour) || !(0..=59).contains(&tm.tm_min) {
            return None;
        }
        Some(WallClock::new(tm.tm_hour as u8, tm.tm_min as u8))
    }

    #[cfg(not(target_os = "espidf"))]
    fn wall_clock(&self) -> Option<WallClock> {
        None
    }
}
