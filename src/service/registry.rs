use crate::error::AppError;
use crate::model::employee::{Employee, NewEmployee};
use crate::store::{EmployeeStore, InsertOutcome};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEmployee {
    pub employee_id: String,
    pub attendance_records_deleted: u64,
}

pub struct EmployeeRegistry {
    employees: Arc<dyn EmployeeStore>,
}

impl EmployeeRegistry {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }

    pub async fn register(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        if self.employees.find(&employee.employee_id).await?.is_some() {
            warn!(employee_id = %employee.employee_id, "Duplicate employee id");
            return Err(AppError::Conflict(format!(
                "Employee with ID '{}' already exists",
                employee.employee_id
            )));
        }

        if self.employees.find_by_email(&employee.email).await?.is_some() {
            warn!(email = %employee.email, "Duplicate employee email");
            return Err(AppError::Conflict(format!(
                "Employee with email '{}' already exists",
                employee.email
            )));
        }

        match self.employees.insert(employee).await? {
            InsertOutcome::Inserted(employee) => {
                info!(employee_id = %employee.employee_id, "Employee registered");
                Ok(employee)
            }
            InsertOutcome::Conflict => {
                warn!("Employee insert lost a uniqueness race");
                Err(AppError::Conflict(
                    "Employee with this ID or email already exists".to_string(),
                ))
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, AppError> {
        let employees = self.employees.list().await?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Case-insensitive lookup by identifier.
    pub async fn get(&self, employee_id: &str) -> Result<Employee, AppError> {
        self.employees
            .find(&employee_id.to_uppercase())
            .await?
            .ok_or_else(|| not_found(employee_id))
    }

    /// Deletes the employee and every attendance record it owns.
    pub async fn delete(&self, employee_id: &str) -> Result<DeletedEmployee, AppError> {
        let normalized = employee_id.to_uppercase();
        if self.employees.find(&normalized).await?.is_none() {
            return Err(not_found(employee_id));
        }

        // a concurrent delete can still win between the lookup and here
        let removed = self
            .employees
            .delete_cascade(&normalized)
            .await?
            .ok_or_else(|| not_found(employee_id))?;

        info!(
            employee_id = %normalized,
            attendance_records_deleted = removed,
            "Employee deleted"
        );
        Ok(DeletedEmployee {
            employee_id: normalized,
            attendance_records_deleted: removed,
        })
    }
}

pub(crate) fn not_found(employee_id: &str) -> AppError {
    AppError::NotFound(format!("Employee with ID '{employee_id}' not found"))
}
