// Template context structures for Askama templates, organized by page group.

use crate::auth::session::{Flash, SessionContext};

pub const APP_NAME: &str = "Clean City Citizen Connect";

/// Common context shared by every page.
/// Templates access these as `ctx.greeting`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub user_type: String,
    pub greeting: String,
    pub flash: Option<Flash>,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &SessionContext, current_path: &str) -> Self {
        let identity = session.identity();
        Self {
            app_name: APP_NAME.to_string(),
            user_type: identity.as_ref().map(|i| i.role().as_str().to_string()).unwrap_or_default(),
            greeting: identity.as_ref().map(|i| i.greeting()).unwrap_or_default(),
            flash: session.take_flash(),
            csrf_token: session.csrf_token(),
            current_path: current_path.to_string(),
        }
    }

    pub fn logged_in(&self) -> bool {
        !self.user_type.is_empty()
    }
}

mod api;
mod common;
mod complaint;

pub use self::api::{ApiErrorResponse, ComplaintListResponse, ComplaintResponse, StatusUpdateRequest, StatusUpdateResponse};
pub use self::common::{HomeTemplate, LoginTemplate, NotFoundTemplate};
pub use self::complaint::{
    CitizenDashboardTemplate, ComplaintCard, ComplaintFormTemplate, MunicipalDashboardTemplate, StatusAction,
};
