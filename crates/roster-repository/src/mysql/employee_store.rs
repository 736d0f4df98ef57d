//! MySQL employee store.
//!
//! Every value reaches the server as a bound parameter. The only identifiers
//! spliced into SQL text are column names taken from [`EmployeeField`].

use crate::{traits::EmployeeStore, DatabasePoolInterface, InsertOutcome};
use async_trait::async_trait;
use roster_core::{
    Employee, EmployeeField, EmployeeId, EmployeePatch, ListScope, NewEmployee, PageRequest,
    RosterError, RosterResult,
};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

const SELECT_COLUMNS: &str =
    "SELECT IDEmpleado, Nombres, Apellidos, Telefono, Email, Direccion FROM empleado";

/// Escape character used in `LIKE` patterns. Not a backslash, so the pattern
/// means the same thing with or without `NO_BACKSLASH_ESCAPES`.
const LIKE_ESCAPE: char = '!';

/// MySQL employee store.
#[derive(Component, Clone)]
#[shaku(interface = EmployeeStore)]
pub struct MySqlEmployeeStore {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlEmployeeStore {
    /// Creates a new MySQL employee store.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an employee.
#[derive(Debug, FromRow)]
struct EmployeeRow {
    #[sqlx(rename = "IDEmpleado")]
    id: i64,
    #[sqlx(rename = "Nombres")]
    first_names: String,
    #[sqlx(rename = "Apellidos")]
    last_names: String,
    #[sqlx(rename = "Telefono")]
    phone: String,
    #[sqlx(rename = "Email")]
    email: String,
    #[sqlx(rename = "Direccion")]
    address: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(row.id),
            first_names: row.first_names,
            last_names: row.last_names,
            phone: row.phone,
            email: row.email,
            address: row.address,
        }
    }
}

/// Builds a `LIKE` pattern matching `term` anywhere, with wildcards in the
/// term matched literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_scope(qb: &mut QueryBuilder<'static, MySql>, scope: &ListScope) {
    match scope {
        ListScope::All => {}
        ListScope::Equals(filter) => {
            qb.push(" WHERE ")
                .push(filter.field.column())
                .push(" = ")
                .push_bind(filter.value.clone());
        }
        ListScope::Search { field, term } => {
            qb.push(" WHERE ")
                .push(field.column())
                .push(" LIKE ")
                .push_bind(contains_pattern(term))
                .push(format!(" ESCAPE '{LIKE_ESCAPE}'"));
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn page_query(scope: &ListScope, page: PageRequest) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(SELECT_COLUMNS);
    push_scope(&mut qb, scope);
    qb.push(" ORDER BY IDEmpleado LIMIT ")
        .push_bind(to_i64(page.limit()))
        .push(" OFFSET ")
        .push_bind(to_i64(page.offset()));
    qb
}

fn count_query(scope: &ListScope) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM empleado");
    push_scope(&mut qb, scope);
    qb
}

fn insert_query(employee: &NewEmployee) -> QueryBuilder<'static, MySql> {
    let assignments = employee.assignments();
    let mut qb = QueryBuilder::new("INSERT INTO empleado (");
    let mut columns = qb.separated(", ");
    for (field, _) in assignments {
        columns.push(field.column());
    }
    qb.push(") VALUES (");
    let mut values = qb.separated(", ");
    for (_, value) in assignments {
        values.push_bind(value.to_string());
    }
    qb.push(")");
    qb
}

fn update_query(id: EmployeeId, assignments: &[(EmployeeField, &str)]) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("UPDATE empleado SET ");
    let mut set = qb.separated(", ");
    for (field, value) in assignments {
        set.push(field.column());
        set.push_unseparated(" = ");
        set.push_bind_unseparated((*value).to_string());
    }
    qb.push(" WHERE IDEmpleado = ").push_bind(id.into_inner());
    qb
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn find_by_id(&self, id: EmployeeId) -> RosterResult<Option<Employee>> {
        debug!("Finding employee by id: {}", id);

        let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_COLUMNS} WHERE IDEmpleado = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Employee::from))
    }

    async fn find_page(&self, scope: &ListScope, page: PageRequest) -> RosterResult<Vec<Employee>> {
        debug!(?scope, page = page.page, size = page.size, "Finding employee page");

        let rows = page_query(scope, page)
            .build_query_as::<EmployeeRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn count(&self, scope: &ListScope) -> RosterResult<u64> {
        let count: i64 = count_query(scope)
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn insert(&self, employee: &NewEmployee) -> RosterResult<InsertOutcome> {
        debug!("Inserting employee: {}", employee.email);

        let result = insert_query(employee).build().execute(self.pool.inner()).await?;
        let affected = result.rows_affected();
        let id = (affected > 0)
            .then(|| i64::try_from(result.last_insert_id()).ok())
            .flatten()
            .map(EmployeeId::new);

        Ok(InsertOutcome { affected, id })
    }

    // Affected counts are matched rows (sqlx negotiates CLIENT_FOUND_ROWS),
    // so rewriting identical values still reports one row.
    async fn update(&self, id: EmployeeId, employee: &NewEmployee) -> RosterResult<u64> {
        debug!("Updating employee: {}", id);

        let result = update_query(id, &employee.assignments())
            .build()
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn patch(&self, id: EmployeeId, patch: &EmployeePatch) -> RosterResult<u64> {
        let assignments = patch.assignments();
        if assignments.is_empty() {
            return Err(RosterError::validation("patch must contain at least one field"));
        }
        debug!("Patching employee {}: {} field(s)", id, assignments.len());

        let result = update_query(id, &assignments)
            .build()
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: EmployeeId) -> RosterResult<u64> {
        debug!("Deleting employee: {}", id);

        let result = sqlx::query("DELETE FROM empleado WHERE IDEmpleado = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> RosterResult<()> {
        self.pool.health_check().await
    }
}

impl std::fmt::Debug for MySqlEmployeeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlEmployeeStore").finish_non_exhaustive()
    }
}
