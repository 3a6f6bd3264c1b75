//! Complaint image resolution.
//!
//! A complaint image reference is tried against an [`ImageProbe`]; failed
//! attempts are retried a bounded number of times with a fixed delay, after
//! which the loader commits to a generated placeholder built from the
//! complaint title. [`ReferenceProbe`] checks static assets, uploaded photos
//! and remote URLs.

use std::future::Future;
use std::net::IpAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::uploads::{handle_from_ref, ImageBlobStore, UPLOAD_PATH_PREFIX};

pub const DEFAULT_PLACEHOLDER_COLOR: &str = "9b87f5";

/// Placeholder image URL carrying `label` as its caption.
pub fn placeholder_url(label: &str, color: &str) -> String {
    let query = serde_urlencoded::to_string(&[("text", label.trim())])
        .unwrap_or_else(|_| "text=Image".to_string());
    format!("https://placehold.co/600x400/{color}/ffffff?{query}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 2, delay: Duration::from_millis(1000) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// `retries` failed attempts have been retried so far.
    Loading { retries: u32 },
    Loaded(String),
    Fallback(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    RetryAfter(Duration),
    Settled(String),
}

#[derive(Debug, Clone)]
pub struct ImageLoader {
    src: String,
    fallback: String,
    policy: RetryPolicy,
    state: LoadState,
}

impl ImageLoader {
    pub fn new(src: &str, fallback_label: &str, color: &str, policy: RetryPolicy) -> Self {
        Self {
            src: src.to_string(),
            fallback: placeholder_url(fallback_label, color),
            policy,
            state: LoadState::Loading { retries: 0 },
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// Source currently shown: the primary reference until the loader settles.
    pub fn rendered_src(&self) -> &str {
        match &self.state {
            LoadState::Loading { .. } => &self.src,
            LoadState::Loaded(src) | LoadState::Fallback(src) => src,
        }
    }

    pub fn on_event(&mut self, event: LoadEvent) -> NextStep {
        let retries = match self.state {
            LoadState::Loading { retries } => retries,
            LoadState::Loaded(ref src) | LoadState::Fallback(ref src) => {
                return NextStep::Settled(src.clone());
            }
        };
        match event {
            LoadEvent::Loaded => {
                self.state = LoadState::Loaded(self.src.clone());
                NextStep::Settled(self.src.clone())
            }
            LoadEvent::Failed if retries < self.policy.max_retries => {
                self.state = LoadState::Loading { retries: retries + 1 };
                NextStep::RetryAfter(self.policy.delay)
            }
            LoadEvent::Failed => {
                log::warn!("Image failed to load: {}, using fallback", self.src);
                self.state = LoadState::Fallback(self.fallback.clone());
                NextStep::Settled(self.fallback.clone())
            }
        }
    }

    /// Drive the loader to completion against `probe`, sleeping between retries.
    pub async fn settle<P: ImageProbe>(mut self, probe: &P) -> String {
        loop {
            let event = if probe.is_reachable(&self.src).await {
                LoadEvent::Loaded
            } else {
                LoadEvent::Failed
            };
            match self.on_event(event) {
                NextStep::Settled(src) => return src,
                NextStep::RetryAfter(delay) => tokio::time::sleep(delay).await,
            }
        }
    }
}

pub trait ImageProbe: Send + Sync {
    fn is_reachable(&self, src: &str) -> impl Future<Output = bool> + Send;
}

/// Resolves `/static/...` references against the static directory on disk.
#[derive(Debug, Clone)]
pub struct LocalAssetProbe {
    static_dir: PathBuf,
}

impl LocalAssetProbe {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self { static_dir: static_dir.into() }
    }

    fn local_path(&self, src: &str) -> Option<PathBuf> {
        let rel = Path::new(src.strip_prefix("/static/")?);
        if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.static_dir.join(rel))
    }
}

impl ImageProbe for LocalAssetProbe {
    async fn is_reachable(&self, src: &str) -> bool {
        match self.local_path(src) {
            Some(path) => tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false),
            None => false,
        }
    }
}

/// Checks remote http(s) references. A reference is reachable when the host
/// answers 2xx with an `image/*` content type. Redirects are not followed and
/// private hosts are refused unless explicitly allowed.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    allow_private_hosts: bool,
}

impl HttpProbe {
    pub fn new(timeout: Duration, allow_private_hosts: bool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, allow_private_hosts }
    }

    fn permits(&self, src: &str) -> bool {
        let Ok(url) = reqwest::Url::parse(src) else {
            return false;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        if self.allow_private_hosts {
            return true;
        }
        let host = host.trim_start_matches('[').trim_end_matches(']').to_ascii_lowercase();
        if host == "localhost" || host.ends_with(".localhost") {
            return false;
        }
        match host.parse::<IpAddr>() {
            Ok(IpAddr::V4(v4)) => {
                !(v4.is_private()
                    || v4.is_loopback()
                    || v4.is_link_local()
                    || v4.is_broadcast()
                    || v4.is_unspecified())
            }
            Ok(IpAddr::V6(v6)) => {
                !(v6.is_loopback() || v6.is_unspecified() || v6.is_unique_local())
            }
            Err(_) => true,
        }
    }

    async fn fetch(&self, src: &str) -> Result<reqwest::Response, reqwest::Error> {
        let resp = self.client.head(src).send().await?;
        if matches!(
            resp.status(),
            reqwest::StatusCode::METHOD_NOT_ALLOWED | reqwest::StatusCode::NOT_IMPLEMENTED
        ) {
            return self.client.get(src).send().await;
        }
        Ok(resp)
    }
}

impl ImageProbe for HttpProbe {
    async fn is_reachable(&self, src: &str) -> bool {
        if !self.permits(src) {
            log::warn!("Refusing to probe image host: {src}");
            return false;
        }
        match self.fetch(src).await {
            Ok(resp) => {
                let is_image = resp
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|ct| ct.trim_start().starts_with("image/"));
                if !resp.status().is_success() || !is_image {
                    log::debug!("Image probe {src}: status {}, image: {is_image}", resp.status());
                }
                resp.status().is_success() && is_image
            }
            Err(e) => {
                log::debug!("Image probe {src} failed: {e}");
                false
            }
        }
    }
}

/// Routes each reference kind to the probe that can check it: static assets
/// on disk, uploaded photos in the blob store, remote images over HTTP.
#[derive(Clone)]
pub struct ReferenceProbe {
    local: LocalAssetProbe,
    uploads: Arc<dyn ImageBlobStore>,
    http: HttpProbe,
}

impl ReferenceProbe {
    pub fn new(local: LocalAssetProbe, uploads: Arc<dyn ImageBlobStore>, http: HttpProbe) -> Self {
        Self { local, uploads, http }
    }
}

impl ImageProbe for ReferenceProbe {
    async fn is_reachable(&self, src: &str) -> bool {
        if src.starts_with("https://") || src.starts_with("http://") {
            self.http.is_reachable(src).await
        } else if src.starts_with(UPLOAD_PATH_PREFIX) {
            handle_from_ref(src).is_some_and(|handle| self.uploads.contains(handle))
        } else {
            self.local.is_reachable(src).await
        }
    }
}
