use actix_web::{web, HttpRequest, HttpResponse};

use crate::handlers::update_mode;
use crate::models::review::ReviewPayload;
use crate::services::ReviewService;

pub async fn create_review(
    service: web::Data<ReviewService>,
    new_review: web::Json<ReviewPayload>,
) -> Result<HttpResponse, actix_web::Error> {
    let review = service.create(new_review.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}

pub async fn get_reviews(service: web::Data<ReviewService>) -> Result<HttpResponse, actix_web::Error> {
    let reviews = service.list().await?;
    Ok(HttpResponse::Ok().json(reviews))
}

pub async fn get_review(
    service: web::Data<ReviewService>,
    review_id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    let review = service.get(review_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

pub async fn update_review(
    req: HttpRequest,
    service: web::Data<ReviewService>,
    review_id: web::Path<i64>,
    updates: web::Json<ReviewPayload>,
) -> Result<HttpResponse, actix_web::Error> {
    let review = service
        .update(review_id.into_inner(), updates.into_inner(), update_mode(&req))
        .await?;
    Ok(HttpResponse::Ok().json(review))
}

pub async fn delete_review(
    service: web::Data<ReviewService>,
    review_id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    service.delete(review_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
