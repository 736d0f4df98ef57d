//! Employee directory controller.

use crate::{
    extractors::{EmployeeIdPath, ListQuery, PageParams, PageQuery, ValidatedJson},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::{Employee, EmployeeField};
use roster_service::{
    EmployeeListResponse, EmployeeRequest, ListParams, MutationResponse, PatchEmployeeRequest,
};
use tracing::debug;

/// Creates the employee router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/lastname/:lastname", get(search_by_last_name))
        .route(
            "/:id",
            get(get_employee)
                .put(update_employee)
                .patch(patch_employee)
                .delete(delete_employee),
        )
}

/// List employees, optionally filtered by exact column value.
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    params(ListParams),
    responses(
        (status = 200, description = "One page of employees", body = EmployeeListResponse),
        (status = 400, description = "Invalid paging or filter parameters")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    ListQuery(query): ListQuery,
) -> ApiResult<EmployeeListResponse> {
    debug!("List employees request: {:?}", query);

    let response = state.employee_service.list_employees(query).await?;
    ok(response)
}

/// Search employees whose last names contain the given text.
#[utoipa::path(
    get,
    path = "/employees/lastname/{lastname}",
    tag = "employees",
    params(
        ("lastname" = String, Path, description = "Text to look for in Apellidos"),
        PageParams
    ),
    responses(
        (status = 200, description = "One page of matching employees", body = EmployeeListResponse),
        (status = 400, description = "Blank search term or invalid paging")
    )
)]
pub async fn search_by_last_name(
    State(state): State<AppState>,
    Path(lastname): Path<String>,
    PageQuery(page): PageQuery,
) -> ApiResult<EmployeeListResponse> {
    debug!("Search employees by last name: {}", lastname);

    let response = state
        .employee_service
        .search_employees(EmployeeField::LastNames, &lastname, page)
        .await?;
    ok(response)
}

/// Get an employee by ID.
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = u32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "The employee", body = Employee),
        (status = 404, description = "No employee with this ID")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
) -> ApiResult<Employee> {
    debug!("Get employee request: {}", id);

    let employee = state.employee_service.get_employee(id).await?;
    ok(employee)
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = MutationResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MutationResponse>>), AppError> {
    debug!("Create employee request: {}", request.email);

    let response = state.employee_service.create_employee(request).await?;
    Ok(created(response))
}

/// Replace every field of an employee.
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = u32, Path, description = "Employee ID")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = MutationResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "No employee with this ID")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
    ValidatedJson(request): ValidatedJson<EmployeeRequest>,
) -> ApiResult<MutationResponse> {
    debug!("Update employee request: {}", id);

    let response = state.employee_service.update_employee(id, request).await?;
    ok(response)
}

/// Change some fields of an employee.
#[utoipa::path(
    patch,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = u32, Path, description = "Employee ID")),
    request_body = PatchEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = MutationResponse),
        (status = 400, description = "Empty patch, unknown or invalid fields"),
        (status = 404, description = "No employee with this ID")
    )
)]
pub async fn patch_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
    ValidatedJson(request): ValidatedJson<PatchEmployeeRequest>,
) -> ApiResult<MutationResponse> {
    debug!("Patch employee request: {}", id);

    let response = state.employee_service.patch_employee(id, request).await?;
    ok(response)
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    params(("id" = u32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = MutationResponse),
        (status = 404, description = "No employee with this ID")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
) -> ApiResult<MutationResponse> {
    debug!("Delete employee request: {}", id);

    let response = state.employee_service.delete_employee(id).await?;
    ok(response)
}
