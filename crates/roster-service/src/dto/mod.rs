//! Data Transfer Objects for service layer.

mod employee_dto;

pub use employee_dto::*;
