use serde::{Deserialize, Serialize};

use crate::models::complaint::{Complaint, ComplaintStatus, Coordinates, Reporter, StatusChange};

/// Complaint as returned by the JSON API. The reporter is only filled for municipal sessions.
#[derive(Serialize, Debug, Clone)]
pub struct ComplaintResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub status: ComplaintStatus,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl ComplaintResponse {
    pub fn from_complaint(c: Complaint, include_reporter: bool) -> Self {
        ComplaintResponse {
            id: c.id,
            date: c.date_iso(),
            title: c.title,
            description: c.description,
            location: c.location,
            status: c.status,
            images: c.images.as_slice().to_vec(),
            reporter: include_reporter.then_some(c.reporter),
            coordinates: c.coordinates,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ComplaintListResponse {
    pub tab: String,
    pub total: usize,
    pub items: Vec<ComplaintResponse>,
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct StatusUpdateResponse {
    pub id: i64,
    pub previous: ComplaintStatus,
    pub status: ComplaintStatus,
    pub message: String,
}

impl From<StatusChange> for StatusUpdateResponse {
    fn from(change: StatusChange) -> Self {
        StatusUpdateResponse {
            id: change.id,
            previous: change.previous,
            status: change.current,
            message: change.current.transition_message(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
}
