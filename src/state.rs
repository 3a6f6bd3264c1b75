use std::sync::Arc;

use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::auth::credentials::MunicipalCredentials;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers;
use crate::images::{HttpProbe, LocalAssetProbe, ReferenceProbe};
use crate::models::complaint::{
    Clock, ComplaintRepository, InMemoryComplaintStore, MAX_IMAGES, SystemClock,
};
use crate::uploads::{ImageBlobStore, InMemoryImageStore};

/// Headroom for the text fields of a complaint form.
const FORM_FIELDS_LIMIT: usize = 64 * 1024;

/// Everything the handlers share. Cloned into each worker's `App`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ComplaintRepository>,
    pub clock: Arc<dyn Clock>,
    pub credentials: Arc<MunicipalCredentials>,
    pub uploads: Arc<dyn ImageBlobStore>,
    pub probe: ReferenceProbe,
    pub config: AppConfig,
}

impl AppState {
    /// Seeded in-memory store, system clock and the demo municipal offices.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = Arc::new(InMemoryComplaintStore::seeded(clock.clone()));
        let credentials = Arc::new(MunicipalCredentials::demo()?);
        log::info!(
            "Loaded {} complaints and {} municipal offices",
            store.len(),
            credentials.len()
        );
        let uploads: Arc<dyn ImageBlobStore> = Arc::new(InMemoryImageStore::new());
        let probe = Self::probe_for(&config, uploads.clone());
        Ok(Self { store, clock, credentials, uploads, probe, config })
    }

    /// Image probe over the static dir, `uploads` and remote hosts.
    pub fn probe_for(config: &AppConfig, uploads: Arc<dyn ImageBlobStore>) -> ReferenceProbe {
        ReferenceProbe::new(
            LocalAssetProbe::new(&config.static_dir),
            uploads,
            HttpProbe::new(config.image_probe_timeout, config.allow_private_image_hosts),
        )
    }

    /// In-memory cap for one complaint form. A fourth photo still fits, so an
    /// oversized selection is answered by form validation rather than a 413.
    fn multipart_config(&self) -> MultipartFormConfig {
        let limit = self.config.max_upload_bytes * (MAX_IMAGES + 1) + FORM_FIELDS_LIMIT;
        MultipartFormConfig::default().total_limit(limit).memory_limit(limit)
    }

    /// Register shared data, static files and every route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.store.clone()))
            .app_data(web::Data::from(self.clock.clone()))
            .app_data(web::Data::from(self.credentials.clone()))
            .app_data(web::Data::from(self.uploads.clone()))
            .app_data(web::Data::new(self.probe.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(self.multipart_config())
            .service(actix_files::Files::new("/static", &self.config.static_dir));
        handlers::routes(cfg);
    }
}
