use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::handlers::update_mode;
use crate::models::employee::EmployeePayload;
use crate::services::EmployeeService;

#[derive(Deserialize)]
pub struct EmployeeQueryParams {
    name: Option<String>,
}

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    new_employee: web::Json<EmployeePayload>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service.create(new_employee.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

pub async fn get_employee(
    service: web::Data<EmployeeService>,
    identifier: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service.get(&identifier).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn get_employees(
    service: web::Data<EmployeeService>,
    query: web::Query<EmployeeQueryParams>,
) -> Result<HttpResponse, actix_web::Error> {
    let employees = service.list(query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// `PUT` replaces every field, `PATCH` only the supplied ones.
pub async fn update_employee(
    req: HttpRequest,
    service: web::Data<EmployeeService>,
    identifier: web::Path<String>,
    updates: web::Json<EmployeePayload>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service
        .update(&identifier, updates.into_inner(), update_mode(&req))
        .await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    identifier: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    service.delete(&identifier).await?;
    Ok(HttpResponse::NoContent().finish())
}
