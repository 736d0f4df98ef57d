//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use roster_core::{Employee, EmployeeField, EmployeeId, ErrorResponse, FieldError};
use roster_service::{
    EmployeeListResponse, EmployeeRequest, MutationResponse, PatchEmployeeRequest,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "Employee directory with cached, paginated and filterable listings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::employee_controller::list_employees,
        crate::controllers::employee_controller::search_by_last_name,
        crate::controllers::employee_controller::get_employee,
        crate::controllers::employee_controller::create_employee,
        crate::controllers::employee_controller::update_employee,
        crate::controllers::employee_controller::patch_employee,
        crate::controllers::employee_controller::delete_employee,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            EmployeeId,
            EmployeeField,
            Employee,
            ErrorResponse,
            FieldError,
            EmployeeRequest,
            PatchEmployeeRequest,
            EmployeeListResponse,
            MutationResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "employees", description = "Employee directory endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
