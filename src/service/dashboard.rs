use crate::error::AppError;
use crate::model::attendance::AttendanceStatus;
use crate::model::dashboard::{DashboardSummary, EmployeeAttendance};
use crate::store::{AttendanceStore, EmployeeStore};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Dashboard {
    employees: Arc<dyn EmployeeStore>,
    attendance: Arc<dyn AttendanceStore>,
}

impl Dashboard {
    pub fn new(employees: Arc<dyn EmployeeStore>, attendance: Arc<dyn AttendanceStore>) -> Self {
        Self {
            employees,
            attendance,
        }
    }

    /// Aggregates headcount and attendance as of `today`.
    pub async fn summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let (total_employees, present_today, absent_today, department_breakdown, present_days) =
            futures::try_join!(
                self.employees.count(),
                self.attendance.count_on(today, AttendanceStatus::Present),
                self.attendance.count_on(today, AttendanceStatus::Absent),
                self.employees.department_counts(),
                self.attendance.present_days(),
            )?;

        let mut attendance_summary = Vec::with_capacity(present_days.len());
        for entry in present_days {
            // TODO: replace the per-group lookup with one batched query; the
            // miss below should be impossible once cascade delete holds.
            match self.employees.find(&entry.employee_id).await? {
                Some(employee) => attendance_summary.push(EmployeeAttendance {
                    employee_id: entry.employee_id,
                    full_name: employee.full_name,
                    department: employee.department,
                    present_days: entry.present_days,
                }),
                None => warn!(
                    employee_id = %entry.employee_id,
                    "Present days recorded for a missing employee, omitted from summary"
                ),
            }
        }

        debug!(%today, total_employees, present_today, absent_today, "Dashboard summary built");
        Ok(DashboardSummary {
            total_employees,
            present_today,
            absent_today,
            not_marked_today: total_employees - present_today - absent_today,
            department_breakdown,
            attendance_summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::MarkAttendance;
    use crate::model::employee::NewEmployee;
    use crate::store::MemoryStore;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn seed_employee(store: &MemoryStore, id: &str, department: &str) {
        EmployeeStore::insert(
            store,
            NewEmployee {
                employee_id: id.into(),
                full_name: format!("Name {id}"),
                email: format!("{}@x.com", id.to_lowercase()),
                department: department.into(),
            },
        )
        .await
        .unwrap();
    }

    async fn seed_mark(store: &MemoryStore, id: &str, date: &str, status: AttendanceStatus) {
        AttendanceStore::insert(
            store,
            MarkAttendance {
                employee_id: id.into(),
                date: day(date),
                status,
            },
        )
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn counts_today_and_unmarked() {
        let store = Arc::new(MemoryStore::new());
        for (id, dept) in [("E1", "Eng"), ("E2", "Eng"), ("E3", "Ops"), ("E4", "Sales")] {
            seed_employee(&store, id, dept).await;
        }
        seed_mark(&store, "E1", "2024-03-01", AttendanceStatus::Present).await;
        seed_mark(&store, "E2", "2024-03-01", AttendanceStatus::Absent).await;
        seed_mark(&store, "E3", "2024-02-29", AttendanceStatus::Present).await;

        let dashboard = Dashboard::new(store.clone(), store.clone());
        let summary = dashboard.summary(day("2024-03-01")).await.unwrap();

        assert_eq!(summary.total_employees, 4);
        assert_eq!(summary.present_today, 1);
        assert_eq!(summary.absent_today, 1);
        assert_eq!(
            summary.not_marked_today,
            summary.total_employees - summary.present_today - summary.absent_today
        );
        assert_eq!(summary.not_marked_today, 2);
        assert_eq!(summary.department_breakdown[0].department, "Eng");
        assert_eq!(summary.department_breakdown[0].count, 2);
    }

    #[actix_web::test]
    async fn present_days_are_ranked_with_employee_details() {
        let store = Arc::new(MemoryStore::new());
        seed_employee(&store, "E1", "Eng").await;
        seed_employee(&store, "E2", "Ops").await;
        seed_mark(&store, "E1", "2024-03-01", AttendanceStatus::Present).await;
        seed_mark(&store, "E2", "2024-03-01", AttendanceStatus::Present).await;
        seed_mark(&store, "E2", "2024-03-02", AttendanceStatus::Present).await;
        seed_mark(&store, "E1", "2024-03-02", AttendanceStatus::Absent).await;

        let dashboard = Dashboard::new(store.clone(), store.clone());
        let summary = dashboard.summary(day("2024-03-05")).await.unwrap();

        assert_eq!(
            summary.attendance_summary,
            vec![
                EmployeeAttendance {
                    employee_id: "E2".into(),
                    full_name: "Name E2".into(),
                    department: "Ops".into(),
                    present_days: 2,
                },
                EmployeeAttendance {
                    employee_id: "E1".into(),
                    full_name: "Name E1".into(),
                    department: "Eng".into(),
                    present_days: 1,
                },
            ]
        );
        assert_eq!(summary.not_marked_today, 2);
    }

    #[actix_web::test]
    async fn orphaned_attendance_is_omitted() {
        let store = Arc::new(MemoryStore::new());
        seed_employee(&store, "E1", "Eng").await;
        seed_mark(&store, "E1", "2024-03-01", AttendanceStatus::Present).await;
        // record for an identifier that was never registered
        seed_mark(&store, "GHOST", "2024-03-01", AttendanceStatus::Present).await;

        let dashboard = Dashboard::new(store.clone(), store.clone());
        let summary = dashboard.summary(day("2024-03-01")).await.unwrap();

        assert_eq!(summary.attendance_summary.len(), 1);
        assert_eq!(summary.attendance_summary[0].employee_id, "E1");
        // inconsistent data shows up as a negative count instead of being clamped
        assert_eq!(summary.present_today, 2);
        assert_eq!(summary.not_marked_today, -1);
    }
}
