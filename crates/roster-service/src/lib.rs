//! # Roster Service
//!
//! The cache-augmented query layer: key derivation, read-through lookups,
//! pagination accounting and write invalidation over the employee store.

pub mod cache;
pub mod dto;
pub mod employee_service;
pub mod r#impl;
pub mod mappers;

pub use cache::*;
pub use dto::*;
pub use employee_service::*;
pub use r#impl::{CachePolicy, EmployeeServiceImpl, EmployeeServiceImplParameters};
