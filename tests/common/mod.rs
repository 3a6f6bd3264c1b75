//! Shared test infrastructure for the integration tests.
//!
//! - `test_env()` - state over a seeded store, a fixed clock and one municipal office
//! - `Browser` - carries the session cookie and csrf token between requests
//! - `send()` - run a request through the app and collect status, redirect and body

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use chrono::NaiveDate;
use regex::Regex;

use cleancity::auth::credentials::MunicipalCredentials;
use cleancity::config::AppConfig;
use cleancity::images::RetryPolicy;
use cleancity::models::complaint::{FixedClock, InMemoryComplaintStore};
use cleancity::state::AppState;
use cleancity::uploads::InMemoryImageStore;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const OFFICE_CODE: &str = "MO8881";
pub const OFFICE_PASS: &str = "PS8881";
pub const CITIZEN_MOBILE: &str = "9123456789";
pub const SESSION_COOKIE: &str = "id";

/// Day the seed data is relative to: complaint #4 is "today", #1 "yesterday".
pub fn seed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 4, 2).expect("valid date")
}

// ============================================================================
// APP SETUP
// ============================================================================

pub struct TestEnv {
    pub state: AppState,
    pub clock: Arc<FixedClock>,
    pub store: Arc<InMemoryComplaintStore>,
    pub uploads: Arc<InMemoryImageStore>,
}

/// Seeded store on a fixed clock, no submission latency, no image retries.
/// Remote image probes may reach loopback hosts started by the tests.
pub fn test_env() -> TestEnv {
    let clock = Arc::new(FixedClock::new(seed_today()));
    let store = Arc::new(InMemoryComplaintStore::seeded(clock.clone()));
    let credentials = Arc::new(
        MunicipalCredentials::from_pairs(&[(OFFICE_CODE, OFFICE_PASS)]).expect("hash credentials"),
    );
    let config = AppConfig {
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        submit_delay: Duration::ZERO,
        image_retry: RetryPolicy { max_retries: 0, delay: Duration::ZERO },
        image_probe_timeout: Duration::from_secs(2),
        allow_private_image_hosts: true,
        ..AppConfig::default()
    };
    let uploads = Arc::new(InMemoryImageStore::new());
    let state = AppState {
        store: store.clone(),
        clock: clock.clone(),
        credentials,
        uploads: uploads.clone(),
        probe: AppState::probe_for(&config, uploads.clone()),
        config,
    };
    TestEnv { state, clock, store, uploads }
}

pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build()
}

/// Initialise the full app for `$env` (a `TestEnv`). Needs `#[macro_use] mod common;`.
#[allow(unused_macros)]
macro_rules! init_app {
    ($env:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(common::session_middleware())
                .configure(|cfg| $env.state.configure(cfg)),
        )
        .await
    };
}

// ============================================================================
// BROWSER
// ============================================================================

/// Outcome of one request.
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Page {
    pub fn redirects_to(&self, path: &str) -> bool {
        self.status == StatusCode::SEE_OTHER && self.location.as_deref() == Some(path)
    }
}

/// Cookie jar of a single client.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
    pub csrf: String,
}

impl Browser {
    pub fn get(&self, uri: &str) -> TestRequest {
        self.attach(TestRequest::get().uri(uri))
    }

    pub fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestRequest {
        self.attach(TestRequest::post().uri(uri).set_form(fields))
    }

    /// `multipart/form-data` POST with text `fields` and file `files`.
    pub fn post_multipart(&self, uri: &str, fields: &[(&str, &str)], files: &[FilePart<'_>]) -> TestRequest {
        self.attach(
            TestRequest::post()
                .uri(uri)
                .insert_header((header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}")))
                .set_payload(multipart_body(fields, files)),
        )
    }

    pub fn attach_json(&self, req: TestRequest, body: &str) -> TestRequest {
        self.attach(
            req.insert_header((header::CONTENT_TYPE, "application/json"))
                .set_payload(body.to_string()),
        )
    }

    fn attach(&self, req: TestRequest) -> TestRequest {
        match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    fn absorb<B>(&mut self, resp: &ServiceResponse<B>) {
        if let Some(cookie) = resp.response().cookies().find(|c| c.name() == SESSION_COOKIE) {
            self.cookie = if cookie.value().is_empty() {
                None
            } else {
                Some(cookie.into_owned())
            };
        }
    }

    fn remember_csrf(&mut self, body: &str) {
        let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).expect("regex");
        if let Some(caps) = re.captures(body) {
            self.csrf = caps[1].to_string();
        }
    }
}

// ============================================================================
// MULTIPART
// ============================================================================

const BOUNDARY: &str = "cleancity-test-boundary";

/// One file input part.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

impl<'a> FilePart<'a> {
    /// A photo on the `images` input.
    pub fn photo(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self { field: "images", file_name, content_type, data }
    }
}

pub fn multipart_body(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Run `req`, update the browser's cookie and csrf token, and collect the response.
pub async fn send<S, R, B>(app: &S, browser: &mut Browser, req: R) -> Page
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    browser.absorb(&resp);
    let status = resp.status();
    let header_value = |name: header::HeaderName| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let location = header_value(header::LOCATION);
    let content_type = header_value(header::CONTENT_TYPE);
    let bytes = test::read_body(resp).await;
    let body = String::from_utf8_lossy(&bytes).into_owned();
    browser.remember_csrf(&body);
    Page { status, location, content_type, body }
}

// ============================================================================
// LOGIN FLOWS
// ============================================================================

/// OTP login for `mobile`; the browser ends on the citizen dashboard redirect.
pub async fn login_citizen<S, B>(app: &S, browser: &mut Browser, mobile: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = browser.get("/login").to_request();
    send(app, browser, req).await;

    let csrf = browser.csrf.clone();
    let req = browser
        .post_form("/login/otp", &[("mobile", mobile), ("csrf_token", csrf.as_str())])
        .to_request();
    let page = send(app, browser, req).await;
    assert!(page.redirects_to("/login"), "OTP request should redirect back to /login");

    let req = browser
        .post_form("/login/citizen", &[("otp", "1234"), ("csrf_token", csrf.as_str())])
        .to_request();
    let page = send(app, browser, req).await;
    assert!(page.redirects_to("/citizen/dashboard"), "OTP verify should land on dashboard");
}

/// Municipal login with the test office.
pub async fn login_municipal<S, B>(app: &S, browser: &mut Browser)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = browser.get("/login?tab=municipal").to_request();
    send(app, browser, req).await;

    let csrf = browser.csrf.clone();
    let req = browser
        .post_form(
            "/login/municipal",
            &[("municipal_code", OFFICE_CODE), ("password", OFFICE_PASS), ("csrf_token", csrf.as_str())],
        )
        .to_request();
    let page = send(app, browser, req).await;
    assert!(page.redirects_to("/municipal/dashboard"), "municipal login should land on dashboard");
}
