//! # Roster REST
//!
//! REST API layer using Axum for the Roster employee service.
//! Provides the employee endpoints, health probes and API documentation.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
