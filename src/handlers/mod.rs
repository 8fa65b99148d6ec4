pub mod employee;
pub mod review;

use actix_web::http::Method;
use actix_web::{web, HttpRequest};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::services::{EmployeeService, ReviewService, UpdateMode};

pub(crate) fn update_mode(req: &HttpRequest) -> UpdateMode {
    if *req.method() == Method::PATCH {
        UpdateMode::Partial
    } else {
        UpdateMode::Full
    }
}

/// Register services and routes. Literal segments (`create`, `reviews`,
/// `delete`) are registered ahead of the `{identifier}` patterns so they are
/// never taken for employee names.
pub fn configure(cfg: &mut web::ServiceConfig, pool: &SqlitePool) {
    cfg.app_data(web::Data::new(EmployeeService::new(pool.clone())))
        .app_data(web::Data::new(ReviewService::new(pool.clone())))
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
        )
        .service(
            web::resource("/employees/create")
                .route(web::post().to(employee::create_employee)),
        )
        .service(
            web::resource("/employees/reviews")
                .route(web::get().to(review::get_reviews))
                .route(web::post().to(review::create_review)),
        )
        .service(
            web::resource("/employees/reviews/{id}")
                .route(web::get().to(review::get_review))
                .route(web::put().to(review::update_review))
                .route(web::patch().to(review::update_review))
                .route(web::delete().to(review::delete_review)),
        )
        .service(
            web::resource("/employees/delete/{identifier}")
                .route(web::delete().to(employee::delete_employee)),
        )
        .service(
            web::resource("/employees/{identifier}/update")
                .route(web::put().to(employee::update_employee))
                .route(web::patch().to(employee::update_employee)),
        )
        .service(
            web::resource("/employees/{identifier}")
                .route(web::get().to(employee::get_employee)),
        )
        .service(
            web::resource("/employees")
                .route(web::get().to(employee::get_employees)),
        );
}
