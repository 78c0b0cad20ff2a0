use crate::{error::AppError, service::Dashboard};
use actix_web::{HttpResponse, web};
use chrono::Local;

/// Dashboard summary
///
/// Counts are taken as of the server's local date.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Headcount and attendance aggregates", body = crate::model::dashboard::DashboardSummary)
    ),
    tag = "Dashboard"
)]
pub async fn summary(dashboard: web::Data<Dashboard>) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let summary = dashboard.summary(today).await?;
    Ok(HttpResponse::Ok().json(summary))
}
