//! # Roster Server Library
//!
//! Dependency injection wiring, telemetry and startup helpers for the
//! Roster employee service binary.

pub mod di;
pub mod startup;
pub mod telemetry;
