use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::auth::session::{SessionContext, UserRole};

fn session_role(req: &ServiceRequest) -> Option<UserRole> {
    SessionContext::new(req.get_session()).role()
}

fn redirect_to_login(req: ServiceRequest) -> ServiceResponse {
    let response = HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish();
    req.into_response(response)
}

/// Citizen pages. Anyone else is sent to /login.
pub async fn require_citizen(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if session_role(&req) != Some(UserRole::Citizen) {
        return Ok(redirect_to_login(req).map_into_right_body());
    }
    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Municipal pages. Anyone else is sent to /login.
pub async fn require_municipal(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if session_role(&req) != Some(UserRole::Municipal) {
        return Ok(redirect_to_login(req).map_into_right_body());
    }
    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Any logged-in session.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if session_role(&req).is_none() {
        return Ok(redirect_to_login(req).map_into_right_body());
    }
    next.call(req).await.map(|res| res.map_into_left_body())
}
