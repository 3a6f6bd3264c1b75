use chrono::NaiveDate;

use super::types::{Complaint, ComplaintStatus, ImageRefs, Reporter};

pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn mock(
    id: i64,
    title: &str,
    location: &str,
    date: NaiveDate,
    status: ComplaintStatus,
    description: &str,
    mobile: &str,
) -> Complaint {
    Complaint {
        id,
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        date,
        status,
        images: ImageRefs::single(PLACEHOLDER_IMAGE),
        reporter: Reporter { name: "Citizen User".to_string(), mobile: mobile.to_string() },
        coordinates: None,
    }
}

/// Demo complaints the store starts with.
pub fn mock_complaints() -> Vec<Complaint> {
    vec![
        mock(
            1,
            "Garbage pile on street",
            "MG Road, Bangalore",
            day(2023, 4, 1),
            ComplaintStatus::Pending,
            "Large pile of garbage on the side of MG Road near the bus stop",
            "9876543210",
        ),
        mock(
            2,
            "Drainage overflow",
            "Church Street, Bangalore",
            day(2023, 3, 28),
            ComplaintStatus::Ongoing,
            "Drainage system is overflowing and causing bad smell and mosquitoes",
            "9876543211",
        ),
        mock(
            3,
            "Broken street light",
            "Brigade Road, Bangalore",
            day(2023, 3, 25),
            ComplaintStatus::Completed,
            "Street light has been broken for over a week causing safety concerns",
            "9876543212",
        ),
        mock(
            4,
            "Water leakage on main road",
            "Indiranagar, Bangalore",
            day(2023, 4, 2),
            ComplaintStatus::Pending,
            "Water pipe leakage causing water wastage and slippery road",
            "9876543213",
        ),
    ]
}
