use super::registry::not_found;
use crate::error::AppError;
use crate::model::attendance::{AttendanceRecord, MarkAttendance};
use crate::store::{AttendanceStore, EmployeeStore, InsertOutcome};
use crate::validation;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct AttendanceTracker {
    employees: Arc<dyn EmployeeStore>,
    attendance: Arc<dyn AttendanceStore>,
}

impl AttendanceTracker {
    pub fn new(employees: Arc<dyn EmployeeStore>, attendance: Arc<dyn AttendanceStore>) -> Self {
        Self {
            employees,
            attendance,
        }
    }

    /// Records a status for (employee, date), overwriting any earlier mark.
    pub async fn mark(&self, mark: MarkAttendance) -> Result<AttendanceRecord, AppError> {
        if self.employees.find(&mark.employee_id).await?.is_none() {
            return Err(not_found(&mark.employee_id));
        }

        if let Some(mut existing) = self.attendance.find(&mark.employee_id, mark.date).await? {
            if self.attendance.set_status(&existing.id, mark.status).await? {
                info!(
                    employee_id = %mark.employee_id,
                    date = %mark.date,
                    status = %mark.status,
                    "Attendance overwritten"
                );
                existing.status = mark.status;
                return Ok(existing);
            }
            // removed between lookup and update, fall through to insert
        }

        let employee_id = mark.employee_id.clone();
        let date = mark.date;
        match self.attendance.insert(mark).await? {
            InsertOutcome::Inserted(record) => {
                info!(
                    employee_id = %record.employee_id,
                    date = %record.date,
                    status = %record.status,
                    "Attendance marked"
                );
                Ok(record)
            }
            InsertOutcome::Conflict => {
                warn!(%employee_id, %date, "Attendance insert lost a uniqueness race");
                Err(AppError::Conflict(
                    "Attendance already marked for this employee on this date".to_string(),
                ))
            }
        }
    }

    /// Records for one employee, newest first, optionally for a single date.
    ///
    /// The employee is looked up before the raw `date` filter is validated,
    /// so an unknown employee is reported as not found whatever the filter.
    pub async fn history(
        &self,
        employee_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let normalized = employee_id.to_uppercase();
        if self.employees.find(&normalized).await?.is_none() {
            return Err(not_found(employee_id));
        }

        let date = date
            .map(|raw| validation::date("date", raw))
            .transpose()
            .map_err(|e| AppError::InvalidInput(vec![e]))?;

        let records = self.attendance.history(&normalized, date).await?;
        debug!(employee_id = %normalized, count = records.len(), "Fetched attendance history");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::attendance::AttendanceStatus;
    use crate::model::dashboard::PresentDays;
    use crate::model::employee::NewEmployee;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    async fn tracker_with(ids: &[&str]) -> (AttendanceTracker, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        for (n, id) in ids.iter().enumerate() {
            EmployeeStore::insert(
                &*store,
                NewEmployee {
                    employee_id: id.to_string(),
                    full_name: format!("Employee {n}"),
                    email: format!("e{n}@x.com"),
                    department: "Eng".into(),
                },
            )
            .await
            .unwrap();
        }
        (AttendanceTracker::new(store.clone(), store.clone()), store)
    }

    fn mark(id: &str, date: &str, status: AttendanceStatus) -> MarkAttendance {
        MarkAttendance {
            employee_id: id.into(),
            date: date.parse().unwrap(),
            status,
        }
    }

    /// Misses every lookup, so the insert is the first to see the duplicate.
    struct BlindAttendance(MemoryStore);

    #[async_trait]
    impl AttendanceStore for BlindAttendance {
        async fn find(
            &self,
            _: &str,
            _: NaiveDate,
        ) -> Result<Option<AttendanceRecord>, StoreError> {
            Ok(None)
        }
        async fn set_status(&self, id: &str, s: AttendanceStatus) -> Result<bool, StoreError> {
            self.0.set_status(id, s).await
        }
        async fn insert(
            &self,
            m: MarkAttendance,
        ) -> Result<InsertOutcome<AttendanceRecord>, StoreError> {
            AttendanceStore::insert(&self.0, m).await
        }
        async fn history(
            &self,
            id: &str,
            date: Option<NaiveDate>,
        ) -> Result<Vec<AttendanceRecord>, StoreError> {
            self.0.history(id, date).await
        }
        async fn count_on(&self, d: NaiveDate, s: AttendanceStatus) -> Result<i64, StoreError> {
            self.0.count_on(d, s).await
        }
        async fn present_days(&self) -> Result<Vec<PresentDays>, StoreError> {
            self.0.present_days().await
        }
    }

    #[actix_web::test]
    async fn unknown_employee_is_not_found() {
        let (tracker, _) = tracker_with(&[]).await;
        let err = tracker
            .mark(mark("E9", "2024-01-01", AttendanceStatus::Present))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            tracker.history("e9", None).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[actix_web::test]
    async fn unknown_employee_wins_over_a_malformed_filter() {
        let (tracker, _) = tracker_with(&["E1"]).await;
        assert!(matches!(
            tracker.history("E9", Some("2024-13-01")).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            tracker.history("E1", Some("2024-13-01")).await.unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[actix_web::test]
    async fn second_mark_overwrites_the_first() {
        let (tracker, _) = tracker_with(&["E1"]).await;
        let first = tracker
            .mark(mark("E1", "2024-01-01", AttendanceStatus::Present))
            .await
            .unwrap();
        let second = tracker
            .mark(mark("E1", "2024-01-01", AttendanceStatus::Absent))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Absent);

        let history = tracker.history("E1", None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, AttendanceStatus::Absent);
    }

    #[actix_web::test]
    async fn history_is_newest_first_and_filterable() {
        let (tracker, _) = tracker_with(&["E1"]).await;
        for day in ["2024-01-02", "2024-01-03", "2024-01-01"] {
            tracker
                .mark(mark("E1", day, AttendanceStatus::Present))
                .await
                .unwrap();
        }

        let dates: Vec<String> = tracker
            .history("e1", None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);

        let one_day = tracker
            .history("E1", Some("2024-01-02"))
            .await
            .unwrap();
        assert_eq!(one_day.len(), 1);
        assert!(
            tracker
                .history("E1", Some("2023-12-31"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[actix_web::test]
    async fn insert_race_surfaces_as_conflict() {
        let (_, store) = tracker_with(&["E1"]).await;
        let attendance = Arc::new(BlindAttendance(MemoryStore::new()));
        let tracker = AttendanceTracker::new(store, attendance);

        tracker
            .mark(mark("E1", "2024-01-01", AttendanceStatus::Present))
            .await
            .unwrap();
        let err = tracker
            .mark(mark("E1", "2024-01-01", AttendanceStatus::Absent))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
