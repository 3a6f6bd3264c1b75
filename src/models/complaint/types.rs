use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of image references a complaint may carry.
pub const MAX_IMAGES: usize = 3;

/// Triage state of a complaint. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Pending,
    Ongoing,
    Completed,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Pending,
        ComplaintStatus::Ongoing,
        ComplaintStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Ongoing => "ongoing",
            ComplaintStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Ongoing => "Ongoing",
            ComplaintStatus::Completed => "Completed",
        }
    }

    /// Message shown to the municipal officer after moving a complaint into this status.
    pub fn transition_message(&self) -> String {
        match self {
            ComplaintStatus::Completed => {
                "Complaint marked as completed. Notification sent to citizen.".to_string()
            }
            other => format!("Complaint status updated to {}.", other.as_str()),
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown complaint status: {}", self.0)
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(ComplaintStatus::Pending),
            "ongoing" => Ok(ComplaintStatus::Ongoing),
            "completed" => Ok(ComplaintStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Ordered list of at most [`MAX_IMAGES`] image references (URLs or site-local paths).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageRefs(Vec<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooManyImages(pub usize);

impl fmt::Display for TooManyImages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} images given, at most {MAX_IMAGES} allowed", self.0)
    }
}

impl ImageRefs {
    pub fn new(refs: Vec<String>) -> Result<Self, TooManyImages> {
        if refs.len() > MAX_IMAGES {
            return Err(TooManyImages(refs.len()));
        }
        Ok(Self(refs))
    }

    pub fn single(reference: &str) -> Self {
        Self(vec![reference.to_string()])
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Citizen who filed the complaint. Only the municipal view shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reporter {
    pub name: String,
    pub mobile: String,
}

/// Browser-supplied position captured when the complaint was filed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Parse `"lat, lon"`. Returns `None` for anything malformed or out of range.
    pub fn parse(raw: &str) -> Option<Self> {
        let (lat, lon) = raw.split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub status: ComplaintStatus,
    pub images: ImageRefs,
    pub reporter: Reporter,
    pub coordinates: Option<Coordinates>,
}

impl Complaint {
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Description cut to `max_chars` characters with a trailing ellipsis.
    pub fn summary(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Citizen-supplied fields of a complaint that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub location: String,
    pub images: ImageRefs,
    pub reporter: Reporter,
    pub coordinates: Option<Coordinates>,
}

impl NewComplaint {
    /// Put uploaded photo references ahead of any linked image, keeping at
    /// most [`MAX_IMAGES`].
    pub fn with_uploaded(mut self, uploaded: impl IntoIterator<Item = String>) -> Self {
        let mut refs: Vec<String> = uploaded.into_iter().collect();
        refs.extend(self.images.0);
        refs.truncate(MAX_IMAGES);
        self.images = ImageRefs(refs);
        self
    }
}

/// Outcome of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub id: i64,
    pub previous: ComplaintStatus,
    pub current: ComplaintStatus,
}

impl StatusChange {
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}
