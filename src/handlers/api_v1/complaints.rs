use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::{Identity, SessionContext, UserRole};
use crate::errors::AppError;
use crate::models::complaint::{filter, Clock, ComplaintRepository, ComplaintStatus, StoreError, View};
use crate::templates_structs::{
    ApiErrorResponse, ComplaintListResponse, ComplaintResponse, StatusUpdateRequest, StatusUpdateResponse,
};

#[derive(Deserialize)]
pub struct ListQuery {
    pub tab: Option<String>,
}

fn error_json(mut builder: actix_web::HttpResponseBuilder, message: impl Into<String>) -> HttpResponse {
    builder.json(ApiErrorResponse { error: message.into() })
}

fn unauthorized() -> HttpResponse {
    error_json(HttpResponse::Unauthorized(), "Login required")
}

fn view_for(identity: &Identity) -> View {
    match identity.role() {
        UserRole::Citizen => View::Citizen,
        UserRole::Municipal => View::Municipal,
    }
}

/// GET /api/v1/complaints?tab=
pub async fn list(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    clock: web::Data<dyn Clock>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(identity) = session.identity() else {
        return Ok(unauthorized());
    };
    let view = view_for(&identity);
    let active = view.resolve_tab(query.tab.as_deref());
    let include_reporter = view == View::Municipal;

    let items: Vec<ComplaintResponse> = filter::apply(&store.list(), active, clock.get_ref())
        .into_iter()
        .map(|c| ComplaintResponse::from_complaint(c, include_reporter))
        .collect();

    Ok(HttpResponse::Ok().json(ComplaintListResponse {
        tab: active.key().to_string(),
        total: items.len(),
        items,
    }))
}

/// GET /api/v1/complaints/{id}
pub async fn read(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let Some(identity) = session.identity() else {
        return Ok(unauthorized());
    };
    let id = path.into_inner();
    match store.find(id) {
        Some(c) => {
            let include_reporter = identity.role() == UserRole::Municipal;
            Ok(HttpResponse::Ok().json(ComplaintResponse::from_complaint(c, include_reporter)))
        }
        None => Ok(error_json(HttpResponse::NotFound(), StoreError::NotFound(id).to_string())),
    }
}

/// PUT /api/v1/complaints/{id}/status
pub async fn update_status(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    path: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    match session.identity() {
        None => return Ok(unauthorized()),
        Some(identity) if identity.role() != UserRole::Municipal => {
            return Ok(error_json(HttpResponse::Forbidden(), "Municipal session required"));
        }
        Some(_) => {}
    }

    let status = match body.status.parse::<ComplaintStatus>() {
        Ok(s) => s,
        Err(e) => return Ok(error_json(HttpResponse::BadRequest(), e.to_string())),
    };

    match store.update_status(path.into_inner(), status) {
        Ok(change) => Ok(HttpResponse::Ok().json(StatusUpdateResponse::from(change))),
        Err(e @ StoreError::NotFound(_)) => Ok(error_json(HttpResponse::NotFound(), e.to_string())),
    }
}
