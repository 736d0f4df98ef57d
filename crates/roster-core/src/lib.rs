//! # Roster Core
//!
//! Core types, traits, and error definitions for the Roster employee service.
//! Every other crate in the workspace builds on the error taxonomy, the
//! pagination types and the employee domain model defined here.

pub mod domain;
pub mod error;
pub mod health;
pub mod id;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use health::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{HasComponent, Interface};
