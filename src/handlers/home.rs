use actix_web::{HttpRequest, HttpResponse};
use askama::Template;

use crate::auth::session::SessionContext;
use crate::errors::{AppError, render};
use crate::templates_structs::{HomeTemplate, NotFoundTemplate, PageContext};

pub async fn index(session: SessionContext) -> Result<HttpResponse, AppError> {
    render(HomeTemplate { ctx: PageContext::build(&session, "/") })
}

pub async fn not_found(req: HttpRequest, session: SessionContext) -> Result<HttpResponse, AppError> {
    log::warn!("404: user attempted to access non-existent route: {}", req.path());
    let body = NotFoundTemplate { ctx: PageContext::build(&session, req.path()) }.render()?;
    Ok(HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
