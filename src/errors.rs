use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::models::complaint::StoreError;
use crate::tasks::TaskError;

#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Session(String),
    Csrf,
    PermissionDenied(String),
    Validation(String),
    Store(StoreError),
    Hash(String),
    Task(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::PermissionDenied(what) => write!(f, "Permission denied: {what}"),
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::Store(e) => write!(f, "{e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Task(e) => write!(f, "Background task error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound | AppError::Store(StoreError::NotFound(_)) => {
                HttpResponse::NotFound().body("Not Found")
            }
            AppError::Csrf => HttpResponse::Forbidden().body(self.to_string()),
            AppError::PermissionDenied(_) => {
                log::warn!("{self}");
                HttpResponse::Forbidden().body("Forbidden")
            }
            AppError::Validation(msg) => HttpResponse::BadRequest().body(msg.clone()),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<TaskError> for AppError {
    fn from(e: TaskError) -> Self {
        AppError::Task(e.to_string())
    }
}

/// Render an askama template into a 200 HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body))
}

/// 303 redirect, the response every form POST ends with.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
