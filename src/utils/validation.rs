use validator::{Validate, ValidateEmail};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Requires a non-empty local part, an `@`, and a domain segment.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Length is measured in UTF-8 bytes, so multi-byte characters count more than once.
pub fn is_strong_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
}
