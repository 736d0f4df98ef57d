//! Store trait definitions.

use async_trait::async_trait;
use roster_core::{Employee, EmployeeId, EmployeePatch, Interface, ListScope, NewEmployee, PageRequest, RosterResult};

/// Result of an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Rows written by the statement.
    pub affected: u64,
    /// Identifier assigned to the new row, if one was written.
    pub id: Option<EmployeeId>,
}

/// The system of record for employees.
///
/// Mutations report the number of affected rows and leave judging that count
/// to the caller. Listing and counting are separate calls with no shared
/// snapshot.
#[async_trait]
pub trait EmployeeStore: Interface + Send + Sync {
    /// Finds an employee by ID.
    async fn find_by_id(&self, id: EmployeeId) -> RosterResult<Option<Employee>>;

    /// Returns one window of the scope, ordered by ID.
    async fn find_page(&self, scope: &ListScope, page: PageRequest) -> RosterResult<Vec<Employee>>;

    /// Counts every employee in the scope.
    async fn count(&self, scope: &ListScope) -> RosterResult<u64>;

    /// Inserts a new employee.
    async fn insert(&self, employee: &NewEmployee) -> RosterResult<InsertOutcome>;

    /// Replaces every field of an employee.
    async fn update(&self, id: EmployeeId, employee: &NewEmployee) -> RosterResult<u64>;

    /// Updates only the fields present in the patch.
    async fn patch(&self, id: EmployeeId, patch: &EmployeePatch) -> RosterResult<u64>;

    /// Deletes an employee.
    async fn delete(&self, id: EmployeeId) -> RosterResult<u64>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> RosterResult<()>;
}
