//! Employee-related DTOs.

use roster_core::{rules, Employee, EmployeeId, Filter, PageRequest, RosterResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request to create or fully replace an employee.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmployeeRequest {
    #[serde(rename = "Nombres")]
    #[validate(
        custom(function = "rules::not_blank", message = "Nombres is required"),
        length(max = 100, message = "Nombres cannot exceed 100 characters")
    )]
    pub first_names: String,

    #[serde(rename = "Apellidos")]
    #[validate(
        custom(function = "rules::not_blank", message = "Apellidos is required"),
        length(max = 100, message = "Apellidos cannot exceed 100 characters")
    )]
    pub last_names: String,

    #[serde(rename = "Telefono")]
    #[validate(
        custom(function = "rules::phone", message = "Invalid phone number"),
        length(max = 30, message = "Telefono cannot exceed 30 characters")
    )]
    pub phone: String,

    #[serde(rename = "Email")]
    #[validate(
        email(message = "Invalid email address"),
        length(max = 150, message = "Email cannot exceed 150 characters")
    )]
    pub email: String,

    #[serde(rename = "Direccion")]
    #[validate(
        custom(function = "rules::not_blank", message = "Direccion is required"),
        length(max = 255, message = "Direccion cannot exceed 255 characters")
    )]
    pub address: String,
}

/// Request to change some fields of an employee.
///
/// Absent fields are left untouched; at least one must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PatchEmployeeRequest {
    #[serde(rename = "Nombres", default, skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "rules::not_blank", message = "Nombres must not be blank"),
        length(max = 100)
    )]
    pub first_names: Option<String>,

    #[serde(rename = "Apellidos", default, skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "rules::not_blank", message = "Apellidos must not be blank"),
        length(max = 100)
    )]
    pub last_names: Option<String>,

    #[serde(rename = "Telefono", default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "rules::phone", message = "Invalid phone number"), length(max = 30))]
    pub phone: Option<String>,

    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"), length(max = 150))]
    pub email: Option<String>,

    #[serde(rename = "Direccion", default, skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "rules::not_blank", message = "Direccion must not be blank"),
        length(max = 255)
    )]
    pub address: Option<String>,
}

/// Raw list query parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub limit: Option<u32>,
    /// Column to filter on.
    pub filter_field: Option<String>,
    /// Exact value the column must hold.
    pub filter_value: Option<String>,
}

/// A validated list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeListQuery {
    pub filter: Option<Filter>,
    pub page: PageRequest,
}

impl EmployeeListQuery {
    /// Validates raw parameters into a query.
    pub fn from_params(params: &ListParams) -> RosterResult<Self> {
        Ok(Self {
            filter: Filter::from_parts(params.filter_field.as_deref(), params.filter_value.as_deref())?,
            page: PageRequest::from_parts(params.page, params.limit)?,
        })
    }

    /// Unfiltered query for one page.
    #[must_use]
    pub fn all(page: PageRequest) -> Self {
        Self { filter: None, page }
    }
}

/// One page of employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    /// Size of the whole filtered population.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub data: Vec<Employee>,
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    /// The affected employee.
    pub id: EmployeeId,
    /// False if the write succeeded but stale cache entries may remain until
    /// they expire.
    pub cache_invalidated: bool,
}
