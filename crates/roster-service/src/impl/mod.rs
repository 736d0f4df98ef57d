//! Employee service implementations.
//!
//! Trait definitions live in the parent module (`employee_service.rs`).

pub mod employee_service_impl;

pub use employee_service_impl::{CachePolicy, EmployeeServiceImpl, EmployeeServiceImplParameters};
