//! In-memory employee store.

use crate::{EmployeeStore, InsertOutcome};
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{
    Employee, EmployeeId, EmployeePatch, ListScope, NewEmployee, PageRequest, RosterError,
    RosterResult,
};
use std::collections::BTreeMap;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<EmployeeId, Employee>,
    next_id: i64,
}

/// Map-backed store with the same contract as the MySQL store, including the
/// unique email constraint and ID ordering.
#[derive(Debug)]
pub struct InMemoryEmployeeStore {
    table: RwLock<Table>,
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store holding the given employees, with IDs assigned in order.
    #[must_use]
    pub fn with_employees(employees: impl IntoIterator<Item = NewEmployee>) -> Self {
        let store = Self::new();
        {
            let mut table = store.table.write();
            for employee in employees {
                let id = EmployeeId::new(table.next_id);
                table.next_id += 1;
                table.rows.insert(id, employee.into_employee(id));
            }
        }
        store
    }

    /// Number of stored employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }

    fn email_taken(table: &Table, email: &str, except: Option<EmployeeId>) -> bool {
        table
            .rows
            .values()
            .any(|e| Some(e.id) != except && e.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find_by_id(&self, id: EmployeeId) -> RosterResult<Option<Employee>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn find_page(&self, scope: &ListScope, page: PageRequest) -> RosterResult<Vec<Employee>> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(self
            .table
            .read()
            .rows
            .values()
            .filter(|e| scope.matches(e))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, scope: &ListScope) -> RosterResult<u64> {
        let count = self.table.read().rows.values().filter(|e| scope.matches(e)).count();
        Ok(count as u64)
    }

    async fn insert(&self, employee: &NewEmployee) -> RosterResult<InsertOutcome> {
        let mut table = self.table.write();
        if Self::email_taken(&table, &employee.email, None) {
            return Err(RosterError::conflict(format!(
                "Duplicate entry '{}' for key 'uq_empleado_email'",
                employee.email
            )));
        }

        let id = EmployeeId::new(table.next_id);
        table.next_id += 1;
        table.rows.insert(id, employee.clone().into_employee(id));

        Ok(InsertOutcome {
            affected: 1,
            id: Some(id),
        })
    }

    async fn update(&self, id: EmployeeId, employee: &NewEmployee) -> RosterResult<u64> {
        let mut table = self.table.write();
        if !table.rows.contains_key(&id) {
            return Ok(0);
        }
        if Self::email_taken(&table, &employee.email, Some(id)) {
            return Err(RosterError::conflict(format!(
                "Duplicate entry '{}' for key 'uq_empleado_email'",
                employee.email
            )));
        }

        table.rows.insert(id, employee.clone().into_employee(id));
        Ok(1)
    }

    async fn patch(&self, id: EmployeeId, patch: &EmployeePatch) -> RosterResult<u64> {
        if patch.is_empty() {
            return Err(RosterError::validation("patch must contain at least one field"));
        }

        let mut table = self.table.write();
        if let Some(email) = &patch.email {
            if table.rows.contains_key(&id) && Self::email_taken(&table, email, Some(id)) {
                return Err(RosterError::conflict(format!(
                    "Duplicate entry '{}' for key 'uq_empleado_email'",
                    email
                )));
            }
        }

        match table.rows.get_mut(&id) {
            Some(employee) => {
                employee.apply(patch);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: EmployeeId) -> RosterResult<u64> {
        Ok(u64::from(self.table.write().rows.remove(&id).is_some()))
    }

    async fn ping(&self) -> RosterResult<()> {
        Ok(())
    }
}
