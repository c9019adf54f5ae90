//! Daily alarm domain core — pure logic, zero I/O.
//!
//! Two halves:
//!
//! - [`registry`] — the in-memory alarm collection and its per-tick
//!   evaluation (fire once per day, re-arm at midnight).
//! - [`store`] — the binary codec that turns the collection into the
//!   NVS blob and tolerantly back.
//!
//! The registry knows nothing about clocks or persistence; both are
//! injected through the port traits in [`crate::app::ports`].

pub mod registry;
pub mod store;

pub use registry::{AlarmRecord, AlarmRegistry, WallClock, MAX_NAME_LEN};
