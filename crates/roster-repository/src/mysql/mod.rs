//! MySQL store implementation.

mod employee_store;

pub use employee_store::*;
