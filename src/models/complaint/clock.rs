use std::sync::RwLock;

use chrono::{Local, NaiveDate};

/// Source of "today" for date stamping and the today/yesterday buckets.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Calendar day of the server's local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for simulating other days.
#[derive(Debug)]
pub struct FixedClock {
    day: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day: RwLock::new(day) }
    }

    pub fn set(&self, day: NaiveDate) {
        let mut current = self.day.write().unwrap_or_else(|e| e.into_inner());
        *current = day;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.day.read().unwrap_or_else(|e| e.into_inner())
    }
}
