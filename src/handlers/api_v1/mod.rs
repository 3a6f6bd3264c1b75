pub mod complaints;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::templates_structs::ApiErrorResponse;

/// Mutation requests must be JSON.
///
/// A browser cannot send a cross-origin JSON body with cookies through a
/// plain form post, so the content-type check doubles as CSRF protection.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::BadRequest().json(ApiErrorResponse {
                error: "Content-Type must be application/json for mutation requests".to_string(),
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/complaints")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(complaints::list))
            .route("/{id}", web::get().to(complaints::read))
            .route("/{id}/status", web::put().to(complaints::update_status)),
    );
}
