//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A strongly-typed wrapper for employee IDs (the `IDEmpleado` primary key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    /// Creates an employee ID from its raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses an employee ID from a string.
    ///
    /// Only unsigned integers are valid identifiers.
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.parse()
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Route ids are unsigned; going through u32 rejects signs and overflow.
        let raw: u32 = s.trim().parse()?;
        Ok(Self(i64::from(raw)))
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EmployeeId> for i64 {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_id_parsing() {
        let id = EmployeeId::parse("42").unwrap();
        assert_eq!(id, EmployeeId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_employee_id_rejects_garbage() {
        assert!(EmployeeId::parse("abc").is_err());
        assert!(EmployeeId::parse("-3").is_err());
        assert!(EmployeeId::parse("").is_err());
    }

    #[test]
    fn test_employee_id_serde_transparent() {
        let json = serde_json::to_string(&EmployeeId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
