// src/models/complaint/filter.rs

use chrono::NaiveDate;

use super::clock::Clock;
use super::types::{Complaint, ComplaintStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Yesterday,
}

impl DateBucket {
    /// Calendar day this bucket selects, relative to `today`.
    pub fn day(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateBucket::Today => today,
            DateBucket::Yesterday => today.pred_opt().unwrap_or(today),
        }
    }
}

/// The single active selection of a dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCriterion {
    All,
    Status(ComplaintStatus),
    Date(DateBucket),
}

impl FilterCriterion {
    pub fn matches(&self, complaint: &Complaint, today: NaiveDate) -> bool {
        match self {
            FilterCriterion::All => true,
            FilterCriterion::Status(status) => complaint.status == *status,
            FilterCriterion::Date(bucket) => complaint.date == bucket.day(today),
        }
    }

    /// Query-string key, e.g. `?tab=pending`.
    pub fn key(&self) -> &'static str {
        match self {
            FilterCriterion::All => "all",
            FilterCriterion::Status(status) => status.as_str(),
            FilterCriterion::Date(DateBucket::Today) => "today",
            FilterCriterion::Date(DateBucket::Yesterday) => "yesterday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterCriterion::All => "All Complaints",
            FilterCriterion::Status(status) => status.label(),
            FilterCriterion::Date(DateBucket::Today) => "Today's Complaints",
            FilterCriterion::Date(DateBucket::Yesterday) => "Yesterday",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim() {
            "all" => Some(FilterCriterion::All),
            "today" => Some(FilterCriterion::Date(DateBucket::Today)),
            "yesterday" => Some(FilterCriterion::Date(DateBucket::Yesterday)),
            other => other.parse::<ComplaintStatus>().ok().map(FilterCriterion::Status),
        }
    }
}

/// Complaints matching `criterion`, in store order.
pub fn apply(complaints: &[Complaint], criterion: FilterCriterion, clock: &dyn Clock) -> Vec<Complaint> {
    let today = clock.today();
    complaints
        .iter()
        .filter(|c| criterion.matches(c, today))
        .cloned()
        .collect()
}

const CITIZEN_TABS: [FilterCriterion; 4] = [
    FilterCriterion::All,
    FilterCriterion::Status(ComplaintStatus::Pending),
    FilterCriterion::Status(ComplaintStatus::Ongoing),
    FilterCriterion::Status(ComplaintStatus::Completed),
];

const MUNICIPAL_TABS: [FilterCriterion; 5] = [
    FilterCriterion::Date(DateBucket::Today),
    FilterCriterion::Date(DateBucket::Yesterday),
    FilterCriterion::Status(ComplaintStatus::Pending),
    FilterCriterion::Status(ComplaintStatus::Ongoing),
    FilterCriterion::Status(ComplaintStatus::Completed),
];

/// Which dashboard is asking; each offers its own tab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Citizen,
    Municipal,
}

impl View {
    pub fn tabs(&self) -> &'static [FilterCriterion] {
        match self {
            View::Citizen => &CITIZEN_TABS,
            View::Municipal => &MUNICIPAL_TABS,
        }
    }

    pub fn default_tab(&self) -> FilterCriterion {
        self.tabs()[0]
    }

    /// Parse a `tab` query value; unknown or foreign tabs fall back to the default.
    pub fn resolve_tab(&self, key: Option<&str>) -> FilterCriterion {
        key.and_then(FilterCriterion::parse)
            .filter(|c| self.tabs().contains(c))
            .unwrap_or_else(|| self.default_tab())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabCount {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

/// Per-tab match counts for the tab strip of `view`.
pub fn tab_counts(
    view: View,
    complaints: &[Complaint],
    active: FilterCriterion,
    clock: &dyn Clock,
) -> Vec<TabCount> {
    let today = clock.today();
    view.tabs()
        .iter()
        .map(|tab| TabCount {
            key: tab.key(),
            label: tab.label(),
            count: complaints.iter().filter(|c| tab.matches(c, today)).count(),
            active: *tab == active,
        })
        .collect()
}
