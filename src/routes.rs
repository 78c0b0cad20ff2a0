use crate::{
    api::{attendance, dashboard, employee},
    error::AppError,
    state::AppState,
};
use actix_governor::Governor;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

#[get("/")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "HRMS Lite API is running"
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    // Malformed bodies and queries answer like any other invalid input
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::invalid("body", err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::invalid("query", err.to_string()).into());

    cfg.app_data(json_config)
        .app_data(query_config)
        .app_data(state.registry.clone())
        .app_data(state.tracker.clone())
        .app_data(state.dashboard.clone())
        .service(health);

    match &state.limiter {
        Some(limiter) => cfg.service(api_scope(&state.api_prefix).wrap(Governor::new(limiter))),
        None => cfg.service(api_scope(&state.api_prefix)),
    };
}

fn api_scope(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::post().to(employee::create_employee))
                        .route(web::get().to(employee::list_employees)),
                )
                // /employees/{employee_id}
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::delete().to(employee::delete_employee)),
                ),
        )
        .service(
            web::scope("/attendance")
                // /attendance
                .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                // /attendance/{employee_id}?date=
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(attendance::attendance_history)),
                ),
        )
        .service(
            web::scope("/dashboard")
                .service(web::resource("/summary").route(web::get().to(dashboard::summary))),
        )
}
