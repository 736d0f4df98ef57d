//! Which slice of the employee table a list query covers.

use super::{Employee, EmployeeField};
use crate::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};

/// An equality filter on a single text column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub field: EmployeeField,
    pub value: String,
}

impl Filter {
    /// Creates a filter.
    #[must_use]
    pub fn new(field: EmployeeField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Builds an optional filter from a raw `(field, value)` pair.
    ///
    /// Both parts absent means no filter. Only one part present is rejected,
    /// as is an unknown field name. An empty value is a real filter matching
    /// empty cells.
    pub fn from_parts(field: Option<&str>, value: Option<&str>) -> RosterResult<Option<Self>> {
        match (field, value) {
            (None, None) => Ok(None),
            (Some(field), Some(value)) => Ok(Some(Self::new(field.parse()?, value))),
            (Some(_), None) => Err(RosterError::validation(
                "filterValue is required when filterField is given",
            )),
            (None, Some(_)) => Err(RosterError::validation(
                "filterField is required when filterValue is given",
            )),
        }
    }
}

/// The population a list query pages over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListScope {
    /// Every employee.
    All,
    /// Employees whose field equals the value.
    Equals(Filter),
    /// Employees whose field contains the term.
    Search { field: EmployeeField, term: String },
}

impl ListScope {
    /// Scope for an optional equality filter.
    #[must_use]
    pub fn from_filter(filter: Option<Filter>) -> Self {
        filter.map_or(Self::All, Self::Equals)
    }

    /// Partial-match scope. Blank terms are rejected.
    pub fn search(field: EmployeeField, term: impl Into<String>) -> RosterResult<Self> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(RosterError::validation("search term must not be blank"));
        }
        Ok(Self::Search { field, term })
    }

    /// Evaluates the scope against a record.
    ///
    /// Comparisons are case-insensitive, like the store's default collation.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            Self::All => true,
            Self::Equals(filter) => employee.field(filter.field).to_lowercase() == filter.value.to_lowercase(),
            Self::Search { field, term } => employee
                .field(*field)
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}
