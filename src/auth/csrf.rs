use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const CSRF_KEY: &str = "csrf_token";

/// Session's form token, minted on first use.
pub fn token_for(session: &Session) -> String {
    if let Ok(Some(token)) = session.get::<String>(CSRF_KEY) {
        return token;
    }
    let token = fresh_token();
    if let Err(e) = session.insert(CSRF_KEY, &token) {
        log::warn!("Could not store csrf token: {e}");
    }
    token
}

/// Reject a form whose token does not match the session's.
pub fn verify(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session.get::<String>(CSRF_KEY).unwrap_or(None).unwrap_or_default();
    if stored.is_empty() || !tokens_match(&stored, submitted) {
        log::warn!("Rejected form with bad csrf token");
        return Err(AppError::Csrf);
    }
    Ok(())
}

fn fresh_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

fn tokens_match(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
