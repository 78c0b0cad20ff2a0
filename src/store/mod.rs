//! Persistence contracts for employees and attendance.
//!
//! Uniqueness is enforced by the backend: a losing concurrent insert comes
//! back as [`InsertOutcome::Conflict`], never as a generic failure.

pub mod memory;
pub mod mysql;

use crate::error::StoreError;
use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus, MarkAttendance},
    dashboard::{DepartmentCount, PresentDays},
    employee::{Employee, NewEmployee},
};
use async_trait::async_trait;
use chrono::NaiveDate;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    Inserted(T),
    /// A uniqueness constraint rejected the write.
    Conflict,
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError>;

    async fn insert(&self, employee: NewEmployee) -> Result<InsertOutcome<Employee>, StoreError>;

    /// All employees ordered by identifier ascending.
    async fn list(&self) -> Result<Vec<Employee>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Employee counts per department, largest first.
    async fn department_counts(&self) -> Result<Vec<DepartmentCount>, StoreError>;

    /// Removes the employee together with its attendance records.
    ///
    /// Returns the number of attendance records removed, or `None` when no
    /// such employee exists (nothing is removed in that case).
    async fn delete_cascade(&self, employee_id: &str) -> Result<Option<u64>, StoreError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Overwrites the status of an existing record. Returns false if the
    /// record is gone.
    async fn set_status(&self, id: &str, status: AttendanceStatus) -> Result<bool, StoreError>;

    async fn insert(
        &self,
        mark: MarkAttendance,
    ) -> Result<InsertOutcome<AttendanceRecord>, StoreError>;

    /// Records for one employee, newest date first.
    async fn history(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    async fn count_on(&self, date: NaiveDate, status: AttendanceStatus)
    -> Result<i64, StoreError>;

    /// Present-record totals per identifier, largest first.
    async fn present_days(&self) -> Result<Vec<PresentDays>, StoreError>;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
