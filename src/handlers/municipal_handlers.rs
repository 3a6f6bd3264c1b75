use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::{Flash, SessionContext};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::complaint::{filter, Clock, ComplaintRepository, ComplaintStatus, View};
use crate::templates_structs::{ComplaintCard, MunicipalDashboardTemplate, PageContext};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
    pub csrf_token: String,
    /// Tab to return to.
    #[serde(default)]
    pub tab: String,
}

pub async fn dashboard(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    clock: web::Data<dyn Clock>,
    config: web::Data<AppConfig>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let active = View::Municipal.resolve_tab(query.tab.as_deref());
    let snapshot = store.list();

    let tabs = filter::tab_counts(View::Municipal, &snapshot, active, clock.get_ref());
    let complaints = filter::apply(&snapshot, active, clock.get_ref())
        .iter()
        .map(|c| ComplaintCard::from_complaint(c, &config.placeholder_color))
        .collect();

    let tmpl = MunicipalDashboardTemplate {
        ctx: PageContext::build(&session, "/municipal/dashboard"),
        tabs,
        active_tab: active.key().to_string(),
        complaints,
    };
    render(tmpl)
}

pub async fn update_status(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    path: web::Path<i64>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();
    let back = format!(
        "/municipal/dashboard?tab={}",
        View::Municipal.resolve_tab(Some(form.tab.as_str())).key()
    );

    let status = match form.status.parse::<ComplaintStatus>() {
        Ok(s) => s,
        Err(e) => {
            session.flash(Flash::error(e.to_string()));
            return Ok(see_other(&back));
        }
    };

    match store.update_status(id, status) {
        Ok(change) if change.is_noop() => {
            session.flash(Flash::info(format!("Complaint #{id} is already {}", change.current)));
        }
        Ok(change) => session.flash(Flash::success(change.current.transition_message())),
        Err(e) => {
            log::warn!("Status update rejected: {e}");
            session.flash(Flash::error(e.to_string()));
        }
    }
    Ok(see_other(&back))
}
