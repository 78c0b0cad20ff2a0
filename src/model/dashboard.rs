use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentCount {
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 12)]
    pub count: i64,
}

/// Number of Present records for one identifier, before the employee lookup.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PresentDays {
    pub employee_id: String,
    pub present_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeAttendance {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 18)]
    pub present_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub total_employees: i64,
    pub present_today: i64,
    pub absent_today: i64,
    /// Not clamped: a negative value points at inconsistent data.
    pub not_marked_today: i64,
    pub department_breakdown: Vec<DepartmentCount>,
    pub attendance_summary: Vec<EmployeeAttendance>,
}
