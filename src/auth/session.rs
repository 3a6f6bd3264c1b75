use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use serde::{Deserialize, Serialize};

use crate::auth::csrf;
use crate::errors::AppError;

const USER_TYPE: &str = "user_type";
const USER_MOBILE: &str = "user_mobile";
const MUNICIPAL_CODE: &str = "municipal_code";
const PENDING_MOBILE: &str = "pending_mobile";
const FLASH: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Citizen,
    Municipal,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::Municipal => "municipal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "citizen" => Some(UserRole::Citizen),
            "municipal" => Some(UserRole::Municipal),
            _ => None,
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserRole::Citizen => "/citizen/dashboard",
            UserRole::Municipal => "/municipal/dashboard",
        }
    }
}

/// Who is logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Citizen { mobile: String },
    Municipal { code: String },
}

impl Identity {
    pub fn role(&self) -> UserRole {
        match self {
            Identity::Citizen { .. } => UserRole::Citizen,
            Identity::Municipal { .. } => UserRole::Municipal,
        }
    }

    /// Mobile number or municipal code.
    pub fn token(&self) -> &str {
        match self {
            Identity::Citizen { mobile } => mobile,
            Identity::Municipal { code } => code,
        }
    }

    pub fn greeting(&self) -> String {
        match self {
            Identity::Citizen { mobile } => format!("Welcome, User {mobile}"),
            Identity::Municipal { code } => format!("Welcome, Municipal Officer ({code})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// One-shot notification shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Info, message: message.into() }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash flash-success",
            FlashKind::Error => "flash flash-error",
            FlashKind::Info => "flash flash-info",
        }
    }
}

/// Typed view over the cookie session. Extract it in handlers instead of
/// reading raw session keys.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn login(&self, identity: &Identity) -> Result<(), AppError> {
        // rotate on privilege change
        self.session.renew();
        self.session.remove(PENDING_MOBILE);
        let (key, value) = match identity {
            Identity::Citizen { mobile } => (USER_MOBILE, mobile),
            Identity::Municipal { code } => (MUNICIPAL_CODE, code),
        };
        self.session
            .insert(USER_TYPE, identity.role().as_str())
            .and_then(|_| self.session.insert(key, value))
            .map_err(|e| AppError::Session(format!("Failed to store login: {e}")))?;
        log::info!("{} {} logged in", identity.role().as_str(), identity.token());
        Ok(())
    }

    /// Drop every session value and rotate the session id. The session stays
    /// usable, so a flash set afterwards reaches the next page.
    pub fn logout(&self) {
        if let Some(identity) = self.identity() {
            log::info!("{} {} logged out", identity.role().as_str(), identity.token());
        }
        self.session.clear();
        self.session.renew();
    }

    pub fn identity(&self) -> Option<Identity> {
        let role = self.get_string(USER_TYPE).and_then(|r| UserRole::parse(&r))?;
        match role {
            UserRole::Citizen => self
                .get_string(USER_MOBILE)
                .filter(|m| !m.is_empty())
                .map(|mobile| Identity::Citizen { mobile }),
            UserRole::Municipal => self
                .get_string(MUNICIPAL_CODE)
                .filter(|c| !c.is_empty())
                .map(|code| Identity::Municipal { code }),
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.identity().map(|i| i.role())
    }

    /// Identity if it has `role`, otherwise `PermissionDenied`.
    pub fn require(&self, role: UserRole) -> Result<Identity, AppError> {
        match self.identity() {
            Some(identity) if identity.role() == role => Ok(identity),
            _ => Err(AppError::PermissionDenied(format!("{} session required", role.as_str()))),
        }
    }

    pub fn set_pending_mobile(&self, mobile: &str) -> Result<(), AppError> {
        self.session
            .insert(PENDING_MOBILE, mobile)
            .map_err(|e| AppError::Session(format!("Failed to store mobile number: {e}")))
    }

    pub fn pending_mobile(&self) -> Option<String> {
        self.get_string(PENDING_MOBILE)
    }

    pub fn clear_pending_mobile(&self) {
        self.session.remove(PENDING_MOBILE);
    }

    pub fn flash(&self, flash: Flash) {
        if let Err(e) = self.session.insert(FLASH, &flash) {
            log::warn!("Dropping flash message: {e}");
        }
    }

    pub fn take_flash(&self) -> Option<Flash> {
        let flash = self.session.get::<Flash>(FLASH).unwrap_or(None);
        if flash.is_some() {
            self.session.remove(FLASH);
        }
        flash
    }

    pub fn csrf_token(&self) -> String {
        csrf::token_for(&self.session)
    }

    pub fn verify_csrf(&self, submitted: &str) -> Result<(), AppError> {
        csrf::verify(&self.session, submitted)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.session.get::<String>(key).unwrap_or(None)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(SessionContext::new(req.get_session())))
    }
}
