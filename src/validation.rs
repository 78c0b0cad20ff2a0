//! Normalization and validation of request payloads.
//!
//! Raw payloads deserialize into the `*Input` types with every field as plain
//! text; `validate()` turns them into the typed values the components accept,
//! or reports every failing field at once.

use crate::error::{AppError, FieldError};
use crate::model::{
    attendance::{AttendanceStatus, MarkAttendance},
    employee::NewEmployee,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

const EMPLOYEE_ID_MAX: usize = 20;
const FULL_NAME_MAX: usize = 100;
const DEPARTMENT_MAX: usize = 50;
/// Matches the width of the `email` column.
const EMAIL_MAX: usize = 254;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "emp-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

impl EmployeeInput {
    pub fn validate(self) -> Result<NewEmployee, AppError> {
        let mut errors = Vec::new();

        let employee_id = collect(&mut errors, employee_identifier(&self.employee_id));
        let full_name = collect(
            &mut errors,
            required_text("full_name", "Full name", &self.full_name, FULL_NAME_MAX),
        );
        let email = collect(&mut errors, email(&self.email));
        let department = collect(
            &mut errors,
            required_text("department", "Department", &self.department, DEPARTMENT_MAX),
        );

        match (employee_id, full_name, email, department) {
            (Some(employee_id), Some(full_name), Some(email), Some(department))
                if errors.is_empty() =>
            {
                Ok(NewEmployee {
                    employee_id,
                    full_name,
                    email,
                    department,
                })
            }
            _ => Err(AppError::InvalidInput(errors)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AttendanceInput {
    #[schema(example = "emp-001")]
    pub employee_id: String,
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

impl AttendanceInput {
    pub fn validate(self) -> Result<MarkAttendance, AppError> {
        let mut errors = Vec::new();

        let employee_id = collect(&mut errors, attendance_identifier(&self.employee_id));
        let date = collect(&mut errors, date("date", &self.date));
        let status = collect(&mut errors, status(&self.status));

        match (employee_id, date, status) {
            (Some(employee_id), Some(date), Some(status)) if errors.is_empty() => {
                Ok(MarkAttendance {
                    employee_id,
                    date,
                    status,
                })
            }
            _ => Err(AppError::InvalidInput(errors)),
        }
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Trims, checks the charset and uppercases a registration identifier.
pub fn employee_identifier(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::new("employee_id", "Employee ID cannot be empty"));
    }
    if value.chars().count() > EMPLOYEE_ID_MAX {
        return Err(FieldError::new(
            "employee_id",
            format!("Employee ID must be at most {EMPLOYEE_ID_MAX} characters"),
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(FieldError::new(
            "employee_id",
            "Employee ID can only contain letters, numbers, hyphens, and underscores",
        ));
    }
    Ok(value.to_uppercase())
}

/// Identifier as given on an attendance mark: trimmed and uppercased only.
pub fn attendance_identifier(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim().to_uppercase();
    if value.is_empty() {
        return Err(FieldError::new("employee_id", "Employee ID cannot be empty"));
    }
    Ok(value)
}

fn required_text(
    field: &'static str,
    label: &str,
    raw: &str,
    max: usize,
) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, format!("{label} cannot be empty")));
    }
    if value.chars().count() > max {
        return Err(FieldError::new(
            field,
            format!("{label} must be at most {max} characters"),
        ));
    }
    Ok(value.to_string())
}

/// Checks address syntax and lowercases the domain part.
pub fn email(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim().to_string();
    if value.chars().count() > EMAIL_MAX {
        return Err(FieldError::new(
            "email",
            format!("Email must be at most {EMAIL_MAX} characters"),
        ));
    }
    if !value.validate_email() {
        return Err(FieldError::new(
            "email",
            "value is not a valid email address",
        ));
    }
    match value.rsplit_once('@') {
        Some((local, domain)) => Ok(format!("{local}@{}", domain.to_lowercase())),
        None => Err(FieldError::new(
            "email",
            "value is not a valid email address",
        )),
    }
}

/// Accepts only `YYYY-MM-DD` naming a real calendar date.
pub fn date(field: &'static str, raw: &str) -> Result<NaiveDate, FieldError> {
    let value = raw.trim();
    let shaped = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(FieldError::new(field, "Date must be in YYYY-MM-DD format"));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|d| d.year() >= 1)
        .ok_or_else(|| FieldError::new(field, "Invalid date"))
}

fn status(raw: &str) -> Result<AttendanceStatus, FieldError> {
    raw.parse().map_err(|_| {
        FieldError::new("status", "Status must be one of: Present, Absent")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str, email: &str, dept: &str) -> EmployeeInput {
        EmployeeInput {
            employee_id: id.into(),
            full_name: name.into(),
            email: email.into(),
            department: dept.into(),
        }
    }

    fn fields(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::InvalidInput(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn identifier_is_trimmed_and_uppercased() {
        let new = employee("  e-100 ", " Ann ", "a@x.com", " Eng ")
            .validate()
            .unwrap();
        assert_eq!(new.employee_id, "E-100");
        assert_eq!(new.full_name, "Ann");
        assert_eq!(new.department, "Eng");
    }

    #[test]
    fn identifier_rejects_foreign_characters() {
        assert!(employee_identifier("e 100").is_err());
        assert!(employee_identifier("e.100").is_err());
        assert!(employee_identifier("   ").is_err());
        assert_eq!(employee_identifier("ab_c-9").unwrap(), "AB_C-9");
    }

    #[test]
    fn identifier_length_is_bounded() {
        assert!(employee_identifier(&"a".repeat(20)).is_ok());
        assert!(employee_identifier(&"a".repeat(21)).is_err());
    }

    #[test]
    fn reports_every_failing_field() {
        let err = employee("", "  ", "not-an-email", "").validate().unwrap_err();
        assert_eq!(
            fields(err),
            vec!["employee_id", "full_name", "email", "department"]
        );
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(email(" John@Example.COM ").unwrap(), "John@example.com");
        assert!(email("john@").is_err());
        assert!(email("@example.com").is_err());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(date("date", "2024-02-30").is_err());
        assert!(date("date", "2023-02-29").is_err());
        assert_eq!(
            date("date", "2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn email_length_is_bounded_by_the_column() {
        let longest = format!(
            "{}@{}.{}.{}.com",
            "a".repeat(64),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(57)
        );
        assert_eq!(longest.len(), 254);
        assert!(email(&longest).is_ok());

        let too_long = format!(
            "{}@{}.{}.{}.com",
            "a".repeat(64),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(63)
        );
        assert_eq!(too_long.len(), 260);
        let err = email(&too_long).unwrap_err();
        assert_eq!(err.field, "email");
    }

    #[test]
    fn rejects_year_zero() {
        assert!(date("date", "0000-01-01").is_err());
        assert!(date("date", "0001-01-01").is_ok());
    }

    #[test]
    fn rejects_misshapen_dates() {
        assert!(date("date", "2024-2-01").is_err());
        assert!(date("date", "01/02/2024").is_err());
        assert!(date("date", "+2024-01-01").is_err());
        assert!(date("date", "").is_err());
    }

    #[test]
    fn attendance_input_normalizes_identifier() {
        let mark = AttendanceInput {
            employee_id: " e1 ".into(),
            date: "2024-01-01".into(),
            status: "Absent".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(mark.employee_id, "E1");
        assert_eq!(mark.status, AttendanceStatus::Absent);
    }

    #[test]
    fn attendance_input_rejects_unknown_status() {
        let err = AttendanceInput {
            employee_id: "E1".into(),
            date: "2024-01-01".into(),
            status: "Late".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(err), vec!["status"]);
    }
}
