pub mod clock;
pub mod filter;
pub mod form;
pub mod seed;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use form::ComplaintForm;
pub use filter::{DateBucket, FilterCriterion, TabCount, View};
pub use store::{ComplaintRepository, InMemoryComplaintStore, StoreError};
pub use types::{
    Complaint, ComplaintStatus, Coordinates, ImageRefs, NewComplaint, Reporter, StatusChange,
    MAX_IMAGES,
};
