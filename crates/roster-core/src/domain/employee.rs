//! Employee entity and its field catalogue.

use crate::{EmployeeId, RosterError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Resource kind name reported in not-found errors.
pub const EMPLOYEE_RESOURCE: &str = "employee";

/// An employee row of the `empleado` table.
///
/// Serialized field names follow the table's column names so that the JSON
/// shape matches what existing clients of the directory expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Employee {
    #[serde(rename = "IDEmpleado")]
    pub id: EmployeeId,
    #[serde(rename = "Nombres")]
    pub first_names: String,
    #[serde(rename = "Apellidos")]
    pub last_names: String,
    #[serde(rename = "Telefono")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Direccion")]
    pub address: String,
}

impl Employee {
    /// Returns the value stored in the given text column.
    #[must_use]
    pub fn field(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::FirstNames => &self.first_names,
            EmployeeField::LastNames => &self.last_names,
            EmployeeField::Phone => &self.phone,
            EmployeeField::Email => &self.email,
            EmployeeField::Address => &self.address,
        }
    }

    /// Applies a sparse patch in place.
    pub fn apply(&mut self, patch: &EmployeePatch) {
        for (field, value) in patch.assignments() {
            let slot = match field {
                EmployeeField::FirstNames => &mut self.first_names,
                EmployeeField::LastNames => &mut self.last_names,
                EmployeeField::Phone => &mut self.phone,
                EmployeeField::Email => &mut self.email,
                EmployeeField::Address => &mut self.address,
            };
            *slot = value.to_string();
        }
    }
}

/// Field values for inserting or fully replacing an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_names: String,
    pub last_names: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl NewEmployee {
    /// Attaches an identifier, producing the stored entity.
    #[must_use]
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_names: self.first_names,
            last_names: self.last_names,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }

    /// Returns `(column, value)` pairs in column order.
    #[must_use]
    pub fn assignments(&self) -> [(EmployeeField, &str); 5] {
        [
            (EmployeeField::FirstNames, self.first_names.as_str()),
            (EmployeeField::LastNames, self.last_names.as_str()),
            (EmployeeField::Phone, self.phone.as_str()),
            (EmployeeField::Email, self.email.as_str()),
            (EmployeeField::Address, self.address.as_str()),
        ]
    }
}

/// A sparse set of column updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub first_names: Option<String>,
    pub last_names: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl EmployeePatch {
    /// Returns true if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Returns the present fields as `(column, value)` pairs in column order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(EmployeeField, &str)> {
        [
            (EmployeeField::FirstNames, &self.first_names),
            (EmployeeField::LastNames, &self.last_names),
            (EmployeeField::Phone, &self.phone),
            (EmployeeField::Email, &self.email),
            (EmployeeField::Address, &self.address),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// The text columns of the `empleado` table.
///
/// This is the only source of column names that ever reaches SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EmployeeField {
    #[serde(rename = "Nombres")]
    FirstNames,
    #[serde(rename = "Apellidos")]
    LastNames,
    #[serde(rename = "Telefono")]
    Phone,
    #[serde(rename = "Email")]
    Email,
    #[serde(rename = "Direccion")]
    Address,
}

impl EmployeeField {
    /// All fields in column order.
    pub const ALL: [Self; 5] = [
        Self::FirstNames,
        Self::LastNames,
        Self::Phone,
        Self::Email,
        Self::Address,
    ];

    /// Returns the SQL column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::FirstNames => "Nombres",
            Self::LastNames => "Apellidos",
            Self::Phone => "Telefono",
            Self::Email => "Email",
            Self::Address => "Direccion",
        }
    }

    const fn rust_name(self) -> &'static str {
        match self {
            Self::FirstNames => "first_names",
            Self::LastNames => "last_names",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
        }
    }
}

impl Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for EmployeeField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| {
                field.column().eq_ignore_ascii_case(name) || field.rust_name().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| RosterError::validation(format!("Unknown employee field: '{}'", name)))
    }
}
