use std::fmt;
use std::sync::{Arc, RwLock};

use super::clock::Clock;
use super::seed;
use super::types::{Complaint, ComplaintStatus, NewComplaint, StatusChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    NotFound(i64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Complaint #{id} not found"),
        }
    }
}

/// Canonical owner of the complaint list.
///
/// Views only ever see snapshots returned by [`list`](Self::list); every
/// mutation goes through [`append`](Self::append) or
/// [`update_status`](Self::update_status).
pub trait ComplaintRepository: Send + Sync {
    /// Snapshot in insertion order.
    fn list(&self) -> Vec<Complaint>;

    fn find(&self, id: i64) -> Option<Complaint>;

    /// Store a new complaint as `pending`, dated today, with a fresh id.
    fn append(&self, new: NewComplaint) -> Complaint;

    /// Replace the status of `id`, keeping every other field.
    /// Setting the current status again succeeds with `previous == current`.
    fn update_status(&self, id: i64, status: ComplaintStatus) -> Result<StatusChange, StoreError>;
}

struct StoreInner {
    complaints: Vec<Complaint>,
    last_id: i64,
}

/// Process-lifetime store. Nothing survives a restart.
pub struct InMemoryComplaintStore {
    inner: RwLock<StoreInner>,
    clock: Arc<dyn Clock>,
}

impl InMemoryComplaintStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_complaints(Vec::new(), clock)
    }

    pub fn with_complaints(complaints: Vec<Complaint>, clock: Arc<dyn Clock>) -> Self {
        let last_id = complaints.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(StoreInner { complaints, last_id }),
            clock,
        }
    }

    /// Store pre-loaded with the demo complaints.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        Self::with_complaints(seed::mock_complaints(), clock)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComplaintRepository for InMemoryComplaintStore {
    fn list(&self) -> Vec<Complaint> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).complaints.clone()
    }

    fn find(&self, id: i64) -> Option<Complaint> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.complaints.iter().find(|c| c.id == id).cloned()
    }

    fn append(&self, new: NewComplaint) -> Complaint {
        let date = self.clock.today();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.last_id += 1;
        let complaint = Complaint {
            id: inner.last_id,
            title: new.title,
            description: new.description,
            location: new.location,
            date,
            status: ComplaintStatus::Pending,
            images: new.images,
            reporter: new.reporter,
            coordinates: new.coordinates,
        };
        inner.complaints.push(complaint.clone());
        log::info!("Complaint #{} filed by {}", complaint.id, complaint.reporter.mobile);
        complaint
    }

    fn update_status(&self, id: i64, status: ComplaintStatus) -> Result<StatusChange, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let complaint = inner
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let previous = complaint.status;
        complaint.status = status;
        log::info!("Complaint #{id} status {previous} -> {status}");
        Ok(StatusChange { id, previous, current: status })
    }
}
