//! Custom Axum extractors.
//!
//! Every rejection is rendered through [`crate::responses::AppError`], so
//! malformed input gets the same JSON envelope as a service error.

mod id;
mod query;
mod validated;

pub use id::*;
pub use query::*;
pub use validated::*;
