use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::SessionContext;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::complaint::{filter, Clock, ComplaintRepository, View};
use crate::templates_structs::{CitizenDashboardTemplate, ComplaintCard, PageContext};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

pub async fn dashboard(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    clock: web::Data<dyn Clock>,
    config: web::Data<AppConfig>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let active = View::Citizen.resolve_tab(query.tab.as_deref());
    let snapshot = store.list();

    let tabs = filter::tab_counts(View::Citizen, &snapshot, active, clock.get_ref());
    let complaints = filter::apply(&snapshot, active, clock.get_ref())
        .iter()
        .map(|c| ComplaintCard::from_complaint(c, &config.placeholder_color))
        .collect();

    let tmpl = CitizenDashboardTemplate {
        ctx: PageContext::build(&session, "/citizen/dashboard"),
        tabs,
        complaints,
    };
    render(tmpl)
}
