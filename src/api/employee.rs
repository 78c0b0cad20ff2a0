use crate::{
    error::AppError,
    service::EmployeeRegistry,
    validation::EmployeeInput,
};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DeleteEmployeeResponse {
    #[schema(example = "Employee 'EMP-001' deleted successfully")]
    pub message: String,
    #[schema(example = 12)]
    pub attendance_records_deleted: u64,
}

/// Register Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee registered", body = crate::model::employee::Employee),
        (status = 409, description = "Employee ID or email already exists", body = Object, example = json!({
            "message": "Employee with ID 'EMP-001' already exists"
        })),
        (status = 422, description = "Invalid input", body = Object, example = json!({
            "message": "Invalid input",
            "errors": [{"field": "email", "message": "value is not a valid email address"}]
        }))
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    registry: web::Data<EmployeeRegistry>,
    payload: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let employee = payload.into_inner().validate()?;
    let created = registry.register(employee).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees ordered by employee ID", body = [crate::model::employee::Employee])
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    registry: web::Data<EmployeeRegistry>,
) -> Result<HttpResponse, AppError> {
    let employees = registry.list_all().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID, case-insensitive")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-404' not found"
        }))
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    registry: web::Data<EmployeeRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = registry.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee and their attendance
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID, case-insensitive")
    ),
    responses(
        (status = 200, description = "Employee and attendance deleted", body = DeleteEmployeeResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-404' not found"
        }))
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    registry: web::Data<EmployeeRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = registry.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeleteEmployeeResponse {
        message: format!("Employee '{}' deleted successfully", deleted.employee_id),
        attendance_records_deleted: deleted.attendance_records_deleted,
    }))
}
