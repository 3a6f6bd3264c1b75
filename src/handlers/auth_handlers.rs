use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::credentials::MunicipalCredentials;
use crate::auth::session::{Flash, Identity, SessionContext, UserRole};
use crate::auth::validate;
use crate::errors::{AppError, render, see_other};
use crate::templates_structs::{LoginTemplate, PageContext};

#[derive(Deserialize)]
pub struct LoginQuery {
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct OtpRequestForm {
    pub mobile: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct OtpVerifyForm {
    pub otp: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct MunicipalLoginForm {
    pub municipal_code: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn citizen_login(session: &SessionContext, mobile: &str, otp_requested: bool, errors: Vec<String>) -> LoginTemplate {
    LoginTemplate {
        mobile: mobile.to_string(),
        otp_requested,
        errors,
        ..LoginTemplate::citizen(PageContext::build(session, "/login"))
    }
}

pub async fn login_page(
    session: SessionContext,
    query: web::Query<LoginQuery>,
) -> Result<HttpResponse, AppError> {
    // Already logged in: straight to the role's dashboard
    if let Some(role) = session.role() {
        return Ok(see_other(role.dashboard_path()));
    }

    if query.tab.as_deref() == Some("municipal") {
        return render(LoginTemplate::municipal(PageContext::build(&session, "/login"), ""));
    }

    let pending = session.pending_mobile();
    let tmpl = citizen_login(
        &session,
        pending.as_deref().unwrap_or_default(),
        pending.is_some(),
        vec![],
    );
    render(tmpl)
}

/// Step one of citizen login. No code is actually sent.
pub async fn request_otp(
    session: SessionContext,
    form: web::Form<OtpRequestForm>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    let mobile = form.mobile.trim();
    if let Some(error) = validate::validate_mobile(mobile) {
        session.clear_pending_mobile();
        return render(citizen_login(&session, mobile, false, vec![error]));
    }

    session.set_pending_mobile(mobile)?;
    log::info!("OTP requested for {mobile}");
    session.flash(Flash::success("OTP sent to your mobile number"));
    Ok(see_other("/login"))
}

/// Step two of citizen login. Any 4-digit code is accepted.
pub async fn verify_otp(
    session: SessionContext,
    form: web::Form<OtpVerifyForm>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    let Some(mobile) = session.pending_mobile() else {
        session.flash(Flash::error("Please request an OTP first"));
        return Ok(see_other("/login"));
    };

    if let Some(error) = validate::validate_otp(&form.otp) {
        return render(citizen_login(&session, &mobile, true, vec![error]));
    }

    session.login(&Identity::Citizen { mobile })?;
    session.flash(Flash::success("Login successful"));
    Ok(see_other(UserRole::Citizen.dashboard_path()))
}

pub async fn municipal_login(
    session: SessionContext,
    form: web::Form<MunicipalLoginForm>,
    credentials: web::Data<MunicipalCredentials>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    let code = form.municipal_code.trim();
    if !credentials.verify(code, &form.password) {
        log::warn!("Rejected municipal login for code {code:?}");
        let tmpl = LoginTemplate {
            errors: vec!["Invalid municipal code or password".to_string()],
            ..LoginTemplate::municipal(PageContext::build(&session, "/login"), code)
        };
        return render(tmpl);
    }

    session.login(&Identity::Municipal { code: code.to_string() })?;
    session.flash(Flash::success("Municipal office login successful"));
    Ok(see_other(UserRole::Municipal.dashboard_path()))
}

pub async fn logout(
    session: SessionContext,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;
    session.logout();
    session.flash(Flash::success("Logged out successfully"));
    Ok(see_other("/login"))
}
