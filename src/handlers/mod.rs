pub mod employee;

use actix_web::web;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::roster::RosterService;

/// Shared server state. Mutations hold `writes` for their whole
/// load-modify-save cycle so they never interleave.
pub struct AppState {
    pub roster: RosterService,
    writes: Mutex<()>,
}

impl AppState {
    pub fn new(roster: RosterService) -> Self {
        AppState {
            roster,
            writes: Mutex::new(()),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::resource("/api/create-employee")
            .route(web::post().to(employee::create_employee)),
    )
    .service(
        web::resource("/api/update-employee")
            .route(web::put().to(employee::update_employee))
            .route(web::delete().to(employee::delete_employee)),
    )
    .service(
        web::resource("/api/employees")
            .route(web::get().to(employee::get_employees)),
    )
    .service(
        web::resource("/api/employees/chart")
            .route(web::get().to(employee::get_employee_chart)),
    )
    .service(
        web::resource("/api/employees/options")
            .route(web::get().to(employee::get_employee_options)),
    );
}
