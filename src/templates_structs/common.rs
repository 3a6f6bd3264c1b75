use askama::Template;

use super::PageContext;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
}

/// Login page with the citizen (OTP) and municipal tabs.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub active_tab: String,
    pub errors: Vec<String>,
    pub mobile: String,
    pub otp_requested: bool,
    pub municipal_code: String,
}

impl LoginTemplate {
    pub fn citizen(ctx: PageContext) -> Self {
        Self {
            ctx,
            active_tab: "citizen".to_string(),
            errors: vec![],
            mobile: String::new(),
            otp_requested: false,
            municipal_code: String::new(),
        }
    }

    pub fn municipal(ctx: PageContext, code: &str) -> Self {
        Self {
            active_tab: "municipal".to_string(),
            municipal_code: code.to_string(),
            ..Self::citizen(ctx)
        }
    }
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub ctx: PageContext,
}
