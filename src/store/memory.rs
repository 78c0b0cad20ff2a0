use super::{AttendanceStore, EmployeeStore, InsertOutcome, new_id};
use crate::error::StoreError;
use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus, MarkAttendance},
    dashboard::{DepartmentCount, PresentDays},
    employee::{Employee, NewEmployee},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Collections {
    /// Keyed by identifier, so iteration is already in identifier order.
    employees: BTreeMap<String, Employee>,
    attendance: BTreeMap<(String, NaiveDate), AttendanceRecord>,
}

/// Process-local store with the same uniqueness rules as the MySQL tables.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn find(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.read()?.employees.get(employee_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .read()?
            .employees
            .values()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn insert(&self, employee: NewEmployee) -> Result<InsertOutcome<Employee>, StoreError> {
        let mut db = self.write()?;
        let taken = db.employees.contains_key(&employee.employee_id)
            || db.employees.values().any(|e| e.email == employee.email);
        if taken {
            return Ok(InsertOutcome::Conflict);
        }

        let employee = employee.into_employee(new_id());
        db.employees
            .insert(employee.employee_id.clone(), employee.clone());
        Ok(InsertOutcome::Inserted(employee))
    }

    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.employees.values().cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.read()?.employees.len() as i64)
    }

    async fn department_counts(&self) -> Result<Vec<DepartmentCount>, StoreError> {
        let db = self.read()?;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for employee in db.employees.values() {
            *counts.entry(employee.department.as_str()).or_default() += 1;
        }

        let mut rows: Vec<DepartmentCount> = counts
            .into_iter()
            .map(|(department, count)| DepartmentCount {
                department: department.to_string(),
                count,
            })
            .collect();
        // stable: ties stay in department order
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(rows)
    }

    async fn delete_cascade(&self, employee_id: &str) -> Result<Option<u64>, StoreError> {
        let mut db = self.write()?;
        if db.employees.remove(employee_id).is_none() {
            return Ok(None);
        }

        let before = db.attendance.len();
        db.attendance.retain(|(owner, _), _| owner != employee_id);
        Ok(Some((before - db.attendance.len()) as u64))
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self
            .read()?
            .attendance
            .get(&(employee_id.to_string(), date))
            .cloned())
    }

    async fn set_status(&self, id: &str, status: AttendanceStatus) -> Result<bool, StoreError> {
        let mut db = self.write()?;
        match db.attendance.values_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert(
        &self,
        mark: MarkAttendance,
    ) -> Result<InsertOutcome<AttendanceRecord>, StoreError> {
        let mut db = self.write()?;
        let key = (mark.employee_id.clone(), mark.date);
        if db.attendance.contains_key(&key) {
            return Ok(InsertOutcome::Conflict);
        }

        let record = mark.into_record(new_id());
        db.attendance.insert(key, record.clone());
        Ok(InsertOutcome::Inserted(record))
    }

    async fn history(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let db = self.read()?;
        let mut records: Vec<AttendanceRecord> = db
            .attendance
            .values()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| date.is_none_or(|d| r.date == d))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn count_on(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, StoreError> {
        Ok(self
            .read()?
            .attendance
            .values()
            .filter(|r| r.date == date && r.status == status)
            .count() as i64)
    }

    async fn present_days(&self) -> Result<Vec<PresentDays>, StoreError> {
        let db = self.read()?;
        let mut totals: HashMap<&str, i64> = HashMap::new();
        for record in db.attendance.values() {
            if record.status == AttendanceStatus::Present {
                *totals.entry(record.employee_id.as_str()).or_default() += 1;
            }
        }

        let mut rows: Vec<PresentDays> = totals
            .into_iter()
            .map(|(employee_id, present_days)| PresentDays {
                employee_id: employee_id.to_string(),
                present_days,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.present_days
                .cmp(&a.present_days)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(rows)
    }
}
