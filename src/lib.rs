//! Clean City: citizens file municipal cleanliness complaints, municipal
//! officers triage them.
//!
//! Complaints live in an in-memory [`models::complaint::InMemoryComplaintStore`]
//! behind the [`models::complaint::ComplaintRepository`] trait. Dashboards
//! show the subset selected by a single [`models::complaint::FilterCriterion`].

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod images;
pub mod models;
pub mod state;
pub mod tasks;
pub mod templates_structs;
pub mod uploads;
