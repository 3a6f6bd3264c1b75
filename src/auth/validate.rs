use crate::models::complaint::MAX_IMAGES;
use crate::uploads::ACCEPTED_TYPES;

pub const MOBILE_DIGITS: usize = 10;
pub const OTP_DIGITS: usize = 4;

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a citizen mobile number: exactly 10 digits.
pub fn validate_mobile(mobile: &str) -> Option<String> {
    if !all_digits(mobile.trim(), MOBILE_DIGITS) {
        return Some("Please enter a valid 10-digit mobile number".to_string());
    }
    None
}

/// Validate a one-time code: exactly 4 digits. Any such code is accepted.
pub fn validate_otp(otp: &str) -> Option<String> {
    if !all_digits(otp.trim(), OTP_DIGITS) {
        return Some("Please enter a valid 4-digit OTP".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

pub fn validate_image_count(count: usize) -> Option<String> {
    if count > MAX_IMAGES {
        return Some(format!("You can only upload up to {MAX_IMAGES} images"));
    }
    None
}

/// An uploaded photo must be a JPEG, PNG, GIF or WebP no larger than `max_bytes`.
pub fn validate_upload(content_type: &str, len: usize, max_bytes: usize) -> Option<String> {
    if !ACCEPTED_TYPES.contains(&content_type) {
        return Some("Only JPEG, PNG, GIF or WebP images can be uploaded".to_string());
    }
    if len > max_bytes {
        return Some(format!("Each image must be at most {} MB", max_bytes / (1024 * 1024)));
    }
    None
}

/// Image references must be http(s) URLs or site-local paths.
pub fn validate_image_ref(reference: &str) -> Option<String> {
    let r = reference.trim();
    let ok = r.starts_with("https://") || r.starts_with("http://") || (r.starts_with('/') && !r.starts_with("//"));
    if !ok || r.len() > 2048 || r.chars().any(char::is_whitespace) {
        return Some(format!("Invalid image reference: {r}"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_must_be_ten_digits() {
        assert_eq!(validate_mobile("9876543210"), None);
        assert!(validate_mobile("987654321").is_some());
        assert!(validate_mobile("98765432100").is_some());
        assert!(validate_mobile("98765abc10").is_some());
        assert!(validate_mobile("").is_some());
    }

    #[test]
    fn otp_must_be_four_digits() {
        assert_eq!(validate_otp("1234"), None);
        assert_eq!(validate_otp("0000"), None);
        assert!(validate_otp("123").is_some());
        assert!(validate_otp("12a4").is_some());
    }

    #[test]
    fn required_field_messages() {
        assert_eq!(validate_required("  ", "Title", 10), Some("Title is required".to_string()));
        assert_eq!(
            validate_required("abcdefghijk", "Title", 10),
            Some("Title must be at most 10 characters".to_string())
        );
        assert_eq!(validate_required("ok", "Title", 10), None);
    }

    #[test]
    fn image_rules() {
        assert_eq!(validate_image_count(3), None);
        assert_eq!(
            validate_image_count(4),
            Some("You can only upload up to 3 images".to_string())
        );
        assert_eq!(validate_image_ref("https://example.com/a.jpg"), None);
        assert_eq!(validate_image_ref("/static/placeholder.svg"), None);
        assert!(validate_image_ref("javascript:alert(1)").is_some());
        assert!(validate_image_ref("//evil.example/x.png").is_some());
    }

    #[test]
    fn upload_rules() {
        assert_eq!(validate_upload("image/png", 10, 1024), None);
        assert_eq!(
            validate_upload("text/html", 10, 1024),
            Some("Only JPEG, PNG, GIF or WebP images can be uploaded".to_string())
        );
        assert_eq!(
            validate_upload("image/jpeg", 6 * 1024 * 1024, 5 * 1024 * 1024),
            Some("Each image must be at most 5 MB".to_string())
        );
    }
}
