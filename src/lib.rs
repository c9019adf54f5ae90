//! PlantPump firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;

// Re-export the ESP-IDF-backed modules so the crate compiles on host
// targets; the hardware implementations are guarded by cfg attributes
// inside.
pub mod adapters;
