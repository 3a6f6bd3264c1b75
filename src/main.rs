use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware};

use cleancity::config::AppConfig;
use cleancity::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let secret_key = config.cookie_key();
    let bind_addr = config.bind_addr.clone();

    // Seed complaints and hash the demo municipal credentials
    let state = AppState::new(config).map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        let state = state.clone();
        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind(bind_addr)?
    .run()
    .await
}
