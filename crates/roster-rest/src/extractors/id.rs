//! Employee ID path extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use roster_core::{EmployeeId, RosterError};

/// The `{id}` path segment, parsed as an unsigned employee ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeIdPath(pub EmployeeId);

#[async_trait]
impl<S> FromRequestParts<S> for EmployeeIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(RosterError::validation(e.body_text())))?;

        EmployeeId::parse(&raw)
            .map(Self)
            .map_err(|_| AppError::from(RosterError::validation(format!("Invalid employee ID: {raw}"))))
    }
}
