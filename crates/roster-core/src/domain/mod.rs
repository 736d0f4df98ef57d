//! Employee domain model.

mod employee;
mod scope;

pub use employee::*;
pub use scope::*;
