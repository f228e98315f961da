//! # Local Form Validation
//!
//! Validation that runs before any network call (error class (a)). Forms
//! call these directly so failures surface inline without a round trip.

use crate::errors::AppError;

/// Maximum accepted display-name length.
pub const MAX_NAME_LENGTH: usize = 64;

/// Validate and normalize an email field: trimmed, non-empty, and shaped
/// like `local@domain`. Full RFC validation is the server's job.
pub fn validate_email(email: &str) -> Result<String, AppError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation("Enter a valid email address"));
    }
    Ok(trimmed.to_string())
}

/// Validate and normalize a display name: trimmed, non-empty, bounded, no
/// control characters.
pub fn validate_display_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Name is too long (max {MAX_NAME_LENGTH} characters)"
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(AppError::validation("Name contains invalid characters"));
    }
    Ok(trimmed.to_string())
}

/// Check that the password and its confirmation field agree.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), AppError> {
    if password != confirmation {
        return Err(AppError::validation("Passwords do not match"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_email_trimmed_and_accepted() {
        assert_eq!(validate_email("  ann@example.com  ").unwrap(), "ann@example.com");
    }

    #[test]
    fn test_email_rejected() {
        assert_matches!(validate_email(""), Err(AppError::Validation { .. }));
        assert_matches!(validate_email("not-an-email"), Err(AppError::Validation { .. }));
        assert_matches!(validate_email("a@b"), Err(AppError::Validation { .. }));
        assert_matches!(validate_email("@example.com"), Err(AppError::Validation { .. }));
    }

    #[test]
    fn test_display_name_rules() {
        assert_eq!(validate_display_name(" Ann ").unwrap(), "Ann");
        assert_matches!(validate_display_name("   "), Err(AppError::Validation { .. }));
        assert_matches!(
            validate_display_name(&"a".repeat(MAX_NAME_LENGTH + 1)),
            Err(AppError::Validation { .. })
        );
        assert_matches!(
            validate_display_name("Ann\x07"),
            Err(AppError::Validation { .. })
        );
    }

    #[test]
    fn test_password_confirmation() {
        assert!(validate_password_confirmation("s3cret", "s3cret").is_ok());
        let err = validate_password_confirmation("s3cret", "secret").unwrap_err();
        assert_eq!(err.message(), "Passwords do not match");
    }
}
