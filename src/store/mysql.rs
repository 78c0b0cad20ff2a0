use super::{AttendanceStore, EmployeeStore, InsertOutcome, new_id};
use crate::error::StoreError;
use crate::model::{
    attendance::{AttendanceRecord, AttendanceRow, AttendanceStatus, MarkAttendance},
    dashboard::{DepartmentCount, PresentDays},
    employee::{Employee, NewEmployee},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

/// True for MySQL's duplicate-entry error (SQLSTATE 23000 / ER_DUP_ENTRY).
fn is_duplicate_key(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() || db_err.code().as_deref() == Some("23000")
        }
        _ => false,
    }
}

fn into_record(row: AttendanceRow) -> Result<AttendanceRecord, StoreError> {
    let id = row.id.clone();
    AttendanceRecord::try_from(row)
        .map_err(|e| StoreError::Corrupt(format!("attendance {id}: {e}")))
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn find(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn insert(&self, employee: NewEmployee) -> Result<InsertOutcome<Employee>, StoreError> {
        let employee = employee.into_employee(new_id());

        let result = sqlx::query(
            r#"
            INSERT INTO employees (id, employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted(employee)),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            ORDER BY employee_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn department_counts(&self) -> Result<Vec<DepartmentCount>, StoreError> {
        let rows = sqlx::query_as::<_, DepartmentCount>(
            r#"
            SELECT department, COUNT(*) AS count
            FROM employees
            GROUP BY department
            ORDER BY count DESC, department ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_cascade(&self, employee_id: &str) -> Result<Option<u64>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let attendance = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        let employee = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        if employee.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        debug!(
            employee_id,
            attendance = attendance.rows_affected(),
            "Cascade delete committed"
        );
        Ok(Some(attendance.rows_affected()))
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn find(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, employee_id, date, status
            FROM attendance
            WHERE employee_id = ? AND date = ?
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        row.map(into_record).transpose()
    }

    async fn set_status(&self, id: &str, status: AttendanceStatus) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;
        // MySQL reports 0 affected rows when the value is unchanged
        if result.rows_affected() > 0 {
            return Ok(true);
        }
        let matching = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(matching > 0)
    }

    async fn insert(
        &self,
        mark: MarkAttendance,
    ) -> Result<InsertOutcome<AttendanceRecord>, StoreError> {
        let record = mark.into_record(new_id());

        let result = sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_id, date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.employee_id)
        .bind(record.date)
        .bind(record.status.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted(record)),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn history(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = match date {
            Some(date) => {
                sqlx::query_as::<_, AttendanceRow>(
                    r#"
                    SELECT id, employee_id, date, status
                    FROM attendance
                    WHERE employee_id = ? AND date = ?
                    ORDER BY date DESC
                    "#,
                )
                .bind(employee_id)
                .bind(date)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AttendanceRow>(
                    r#"
                    SELECT id, employee_id, date, status
                    FROM attendance
                    WHERE employee_id = ?
                    ORDER BY date DESC
                    "#,
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(into_record).collect()
    }

    async fn count_on(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?",
        )
        .bind(date)
        .bind(status.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn present_days(&self) -> Result<Vec<PresentDays>, StoreError> {
        let rows = sqlx::query_as::<_, PresentDays>(
            r#"
            SELECT employee_id, COUNT(*) AS present_days
            FROM attendance
            WHERE status = ?
            GROUP BY employee_id
            ORDER BY present_days DESC, employee_id ASC
            "#,
        )
        .bind(AttendanceStatus::Present.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
