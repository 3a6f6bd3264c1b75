use askama::Template;

use crate::images::placeholder_url;
use crate::models::complaint::{Complaint, ComplaintForm, ComplaintStatus, TabCount, MAX_IMAGES};
use crate::uploads::ACCEPTED_TYPES;
use super::PageContext;

/// One mutation button on a municipal complaint card.
pub struct StatusAction {
    pub status: &'static str,
    pub label: String,
}

/// Display-ready projection of a complaint.
pub struct ComplaintCard {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub status_key: &'static str,
    pub status_label: &'static str,
    pub image_src: String,
    /// Shown by the page if `image_src` still fails to load.
    pub fallback_src: String,
    pub image_count: usize,
    pub reporter_name: String,
    pub reporter_mobile: String,
    pub coordinates: Option<String>,
    pub actions: Vec<StatusAction>,
}

impl ComplaintCard {
    pub fn from_complaint(c: &Complaint, placeholder_color: &str) -> Self {
        let actions = ComplaintStatus::ALL
            .iter()
            .filter(|s| **s != c.status)
            .map(|s| StatusAction { status: s.as_str(), label: format!("Mark as {}", s.label()) })
            .collect();
        Self {
            id: c.id,
            title: c.title.clone(),
            summary: c.summary(100),
            description: c.description.clone(),
            location: c.location.clone(),
            date: c.date.format("%d %b %Y").to_string(),
            status_key: c.status.as_str(),
            status_label: c.status.label(),
            image_src: format!("/images/complaints/{}/0", c.id),
            fallback_src: placeholder_url(&c.title, placeholder_color),
            image_count: c.images.len(),
            reporter_name: c.reporter.name.clone(),
            reporter_mobile: c.reporter.mobile.clone(),
            coordinates: c.coordinates.map(|p| p.to_string()),
            actions,
        }
    }
}

#[derive(Template)]
#[template(path = "citizen/dashboard.html")]
pub struct CitizenDashboardTemplate {
    pub ctx: PageContext,
    pub tabs: Vec<TabCount>,
    pub complaints: Vec<ComplaintCard>,
}

#[derive(Template)]
#[template(path = "municipal/dashboard.html")]
pub struct MunicipalDashboardTemplate {
    pub ctx: PageContext,
    pub tabs: Vec<TabCount>,
    pub active_tab: String,
    pub complaints: Vec<ComplaintCard>,
}

#[derive(Template)]
#[template(path = "citizen/new_complaint.html")]
pub struct ComplaintFormTemplate {
    pub ctx: PageContext,
    pub form: ComplaintForm,
    pub errors: Vec<String>,
    pub max_images: usize,
    pub accepted_types: String,
}

impl ComplaintFormTemplate {
    pub fn new(ctx: PageContext, form: ComplaintForm, errors: Vec<String>) -> Self {
        Self { ctx, form, errors, max_images: MAX_IMAGES, accepted_types: ACCEPTED_TYPES.join(",") }
    }
}
