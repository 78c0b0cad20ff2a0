use crate::{
    error::AppError,
    service::AttendanceTracker,
    validation::AttendanceInput,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Only return the record for this date (YYYY-MM-DD)
    pub date: Option<String>,
}

/// Mark attendance
///
/// Marking the same employee and date again overwrites the earlier status.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendanceInput,
    responses(
        (status = 201, description = "Attendance recorded", body = crate::model::attendance::AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-404' not found"
        })),
        (status = 409, description = "Concurrent mark for the same day", body = Object, example = json!({
            "message": "Attendance already marked for this employee on this date"
        })),
        (status = 422, description = "Invalid input", body = Object, example = json!({
            "message": "Invalid input",
            "errors": [{"field": "date", "message": "Invalid date"}]
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    tracker: web::Data<AttendanceTracker>,
    payload: web::Json<AttendanceInput>,
) -> Result<HttpResponse, AppError> {
    let mark = payload.into_inner().validate()?;
    let record = tracker.mark(mark).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Attendance history
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID, case-insensitive"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Records, newest first", body = [crate::model::attendance::AttendanceRecord]),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP-404' not found"
        })),
        (status = 422, description = "Malformed date filter")
    ),
    tag = "Attendance"
)]
pub async fn attendance_history(
    tracker: web::Data<AttendanceTracker>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let records = tracker
        .history(&path.into_inner(), query.date.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(records))
}
