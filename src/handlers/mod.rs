pub mod api_v1;
pub mod auth_handlers;
pub mod citizen_handlers;
pub mod complaint_handlers;
pub mod home;
pub mod image_handlers;
pub mod municipal_handlers;

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::auth::middleware::{require_auth, require_citizen, require_municipal};

/// Full route table. `/complaints/new` is registered before `/complaints/{id}/status`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/", web::get().to(home::index))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login/otp", web::post().to(auth_handlers::request_otp))
        .route("/login/citizen", web::post().to(auth_handlers::verify_otp))
        .route("/login/municipal", web::post().to(auth_handlers::municipal_login))
        .route("/logout", web::post().to(auth_handlers::logout))
        // JSON API, session checked per handler
        .service(web::scope("/api/v1").configure(api_v1::configure))
        // Citizen
        .service(
            web::scope("/citizen")
                .wrap(from_fn(require_citizen))
                .route("/dashboard", web::get().to(citizen_handlers::dashboard)),
        )
        .service(
            web::resource("/complaints/new")
                .wrap(from_fn(require_citizen))
                .route(web::get().to(complaint_handlers::new_form)),
        )
        .service(
            web::resource("/complaints")
                .wrap(from_fn(require_citizen))
                .route(web::post().to(complaint_handlers::create)),
        )
        // Municipal
        .service(
            web::scope("/municipal")
                .wrap(from_fn(require_municipal))
                .route("/dashboard", web::get().to(municipal_handlers::dashboard)),
        )
        .service(
            web::resource("/complaints/{id}/status")
                .wrap(from_fn(require_municipal))
                .route(web::post().to(municipal_handlers::update_status)),
        )
        // Images, any session
        .service(
            web::resource("/images/complaints/{id}/{index}")
                .wrap(from_fn(require_auth))
                .route(web::get().to(image_handlers::complaint_image)),
        )
        .service(
            web::resource("/uploads/{handle}")
                .wrap(from_fn(require_auth))
                .route(web::get().to(image_handlers::uploaded_image)),
        )
        .default_service(web::to(home::not_found));
}
