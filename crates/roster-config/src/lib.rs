//! # Roster Config
//!
//! Configuration management for the Roster employee service.
//! Supports layered configuration from files and environment variables,
//! validated up front so that misconfiguration fails at startup.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
