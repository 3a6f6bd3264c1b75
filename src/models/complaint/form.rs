use crate::auth::validate;
use super::types::{Coordinates, ImageRefs, NewComplaint, Reporter};

pub const TITLE_MAX: usize = 120;
pub const DESCRIPTION_MAX: usize = 2000;
pub const LOCATION_MAX: usize = 200;

/// Location text used when the browser supplied coordinates but the citizen left the field empty.
pub const DETECTED_LOCATION: &str = "Current Location (detected)";

/// Text fields of the new-complaint page. Uploaded photos travel separately.
#[derive(Debug, Clone, Default)]
pub struct ComplaintForm {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Optional link to an image hosted elsewhere.
    pub image_link: String,
    pub coordinates: String,
    pub csrf_token: String,
}

impl ComplaintForm {
    /// The image link, if one was given.
    pub fn image_refs(&self) -> Vec<String> {
        let link = self.image_link.trim();
        if link.is_empty() { Vec::new() } else { vec![link.to_string()] }
    }

    /// Validate and turn into a complaint for `mobile`. `photo_count` uploaded
    /// photos count towards the image limit; they are attached later with
    /// [`NewComplaint::with_uploaded`]. Errors are user-facing messages.
    pub fn into_new_complaint(self, mobile: &str, photo_count: usize) -> Result<NewComplaint, Vec<String>> {
        let mut errors = Vec::new();
        let coordinates = Coordinates::parse(&self.coordinates);

        let mut location = self.location.trim().to_string();
        if location.is_empty() && coordinates.is_some() {
            location = DETECTED_LOCATION.to_string();
        }

        if self.title.trim().is_empty() || self.description.trim().is_empty() || location.is_empty() {
            errors.push("Please fill all required fields".to_string());
        } else {
            errors.extend(validate::validate_required(&self.title, "Title", TITLE_MAX));
            errors.extend(validate::validate_required(&self.description, "Description", DESCRIPTION_MAX));
            errors.extend(validate::validate_required(&location, "Location", LOCATION_MAX));
        }

        let refs = self.image_refs();
        errors.extend(validate::validate_image_count(photo_count + refs.len()));
        errors.extend(refs.iter().filter_map(|r| validate::validate_image_ref(r)));

        let images = match ImageRefs::new(refs) {
            Ok(images) => images,
            Err(_) => ImageRefs::default(),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewComplaint {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location,
            images,
            reporter: Reporter { name: "Citizen User".to_string(), mobile: mobile.to_string() },
            coordinates,
        })
    }
}
