use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "5c1d2a90-8f63-4b8e-a2f4-71d0c5b3e9aa")]
    pub id: String,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Row shape as stored; `status` is kept as text in the table.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = strum::ParseError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status: row.status.parse()?,
        })
    }
}

/// A validated attendance mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl MarkAttendance {
    pub fn into_record(self, id: String) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_only_exact_names() {
        assert_eq!("Present".parse(), Ok(AttendanceStatus::Present));
        assert_eq!("Absent".parse(), Ok(AttendanceStatus::Absent));
        assert!("present".parse::<AttendanceStatus>().is_err());
        assert!("Late".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let row = AttendanceRow {
            id: "1".into(),
            employee_id: "E1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: "Sick".into(),
        };
        assert!(AttendanceRecord::try_from(row).is_err());
    }
}
