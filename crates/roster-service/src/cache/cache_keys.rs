//! Cache key generators for consistent key naming.
//!
//! Every input that changes a result is part of its key. Free-text values are
//! form-urlencoded, so they can never contain the `:` and `=` separators and
//! two different inputs never share a key.

use roster_core::{EmployeeId, ListScope, PageRequest};
use url::form_urlencoded::byte_serialize;

/// Namespace for employee entries.
const EMPLOYEE_PREFIX: &str = "roster:cache:employee";

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

fn scope_segment(scope: &ListScope) -> String {
    match scope {
        ListScope::All => "all".to_string(),
        ListScope::Equals(filter) => format!("eq:{}={}", filter.field.column(), encode(&filter.value)),
        ListScope::Search { field, term } => format!("like:{}={}", field.column(), encode(term)),
    }
}

/// Key for a single employee.
#[must_use]
pub fn employee_by_id(id: EmployeeId) -> String {
    format!("{EMPLOYEE_PREFIX}:item:{id}")
}

/// Key for one page of a list or search result.
#[must_use]
pub fn employee_collection(scope: &ListScope, page: PageRequest) -> String {
    format!(
        "{EMPLOYEE_PREFIX}:list:{}:page={}:size={}",
        scope_segment(scope),
        page.page,
        page.size
    )
}

/// Set recording every live collection key.
#[must_use]
pub fn collection_index() -> String {
    format!("{EMPLOYEE_PREFIX}:index")
}

/// Key read by health probes; never written.
#[must_use]
pub fn health_probe() -> String {
    format!("{EMPLOYEE_PREFIX}:health")
}

/// Glob matching every collection key.
#[must_use]
pub fn collection_pattern() -> String {
    format!("{EMPLOYEE_PREFIX}:list:*")
}
