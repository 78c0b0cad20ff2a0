use crate::api::employee::DeleteEmployeeResponse;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::dashboard::{DashboardSummary, DepartmentCount, EmployeeAttendance};
use crate::model::employee::Employee;
use crate::validation::{AttendanceInput, EmployeeInput};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management API for tracking employees and their
daily attendance.

### Key Features
- **Employee Management**
  - Register, list, view and delete employees
  - Deleting an employee also deletes their attendance history
- **Attendance Management**
  - Mark an employee Present or Absent for a date; marking again overwrites
  - View attendance history, optionally for a single date
- **Dashboard**
  - Today's present / absent / unmarked counts
  - Department headcount and present-day totals per employee

### Response Format
- JSON bodies throughout
- Errors carry a `message`; invalid input also lists the offending `errors`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::attendance_history,

        crate::api::dashboard::summary
    ),
    components(
        schemas(
            Employee,
            EmployeeInput,
            DeleteEmployeeResponse,
            AttendanceInput,
            AttendanceRecord,
            AttendanceStatus,
            DashboardSummary,
            DepartmentCount,
            EmployeeAttendance
        )
    ),
    tags(
        (name = "Employees", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Aggregated metrics"),
    )
)]
pub struct ApiDoc;
