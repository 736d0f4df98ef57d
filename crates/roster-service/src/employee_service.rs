//! Employee service trait definition.

use crate::dto::{
    EmployeeListQuery, EmployeeListResponse, EmployeeRequest, MutationResponse,
    PatchEmployeeRequest,
};
use async_trait::async_trait;
use roster_core::{
    Employee, EmployeeField, EmployeeId, HealthStatus, Interface, PageRequest, RosterResult,
};

/// Employee service trait.
///
/// Reads go through the cache; writes hit the store first and then
/// invalidate every cached view they could have changed.
#[async_trait]
pub trait EmployeeService: Interface + Send + Sync {
    /// Gets an employee by ID.
    async fn get_employee(&self, id: EmployeeId) -> RosterResult<Employee>;

    /// Lists one page of employees, optionally filtered by exact column value.
    async fn list_employees(&self, query: EmployeeListQuery) -> RosterResult<EmployeeListResponse>;

    /// Lists one page of employees whose column contains `term`.
    async fn search_employees(
        &self,
        field: EmployeeField,
        term: &str,
        page: PageRequest,
    ) -> RosterResult<EmployeeListResponse>;

    /// Creates a new employee.
    async fn create_employee(&self, request: EmployeeRequest) -> RosterResult<MutationResponse>;

    /// Replaces every field of an employee.
    async fn update_employee(
        &self,
        id: EmployeeId,
        request: EmployeeRequest,
    ) -> RosterResult<MutationResponse>;

    /// Changes the fields present in the request.
    async fn patch_employee(
        &self,
        id: EmployeeId,
        request: PatchEmployeeRequest,
    ) -> RosterResult<MutationResponse>;

    /// Deletes an employee.
    async fn delete_employee(&self, id: EmployeeId) -> RosterResult<MutationResponse>;

    /// Reports whether the store and cache are reachable.
    async fn health_check(&self) -> HealthStatus;
}
