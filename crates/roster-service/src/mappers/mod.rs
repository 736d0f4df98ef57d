//! Entity-DTO mappers.

use crate::dto::{EmployeeListResponse, EmployeeRequest, PatchEmployeeRequest};
use roster_core::{Employee, EmployeePatch, NewEmployee, Page};

/// Converts a page of employees to a list response.
impl From<Page<Employee>> for EmployeeListResponse {
    fn from(page: Page<Employee>) -> Self {
        Self {
            total: page.total_count,
            page: page.page,
            limit: page.page_size,
            total_pages: page.total_pages,
            data: page.records,
        }
    }
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(request: EmployeeRequest) -> Self {
        Self {
            first_names: request.first_names,
            last_names: request.last_names,
            phone: request.phone,
            email: request.email,
            address: request.address,
        }
    }
}

impl From<PatchEmployeeRequest> for EmployeePatch {
    fn from(request: PatchEmployeeRequest) -> Self {
        Self {
            first_names: request.first_names,
            last_names: request.last_names,
            phone: request.phone,
            email: request.email,
            address: request.address,
        }
    }
}
