//! Field-level validation for the login form.
//!
//! Validators are total: they never panic, touch nothing outside their
//! input, and return `None` when the field is valid or `Some` with the
//! user-facing message for that single field. Whole-form authentication
//! errors are a separate concern handled by the flow.

use regex::Regex;

const MIN_PASSWORD_CHARS: usize = 8;

/// Validate the email field, returning the message to show under it.
#[must_use]
pub fn validate_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return Some("Email is required".to_string());
    }

    if !valid_email(email) {
        return Some("Please enter a valid email address".to_string());
    }

    None
}

/// Validate the password field, returning the message to show under it.
#[must_use]
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Some("Password must be at least 8 characters".to_string());
    }

    None
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_email_is_required() {
        assert_eq!(validate_email(""), Some("Email is required".to_string()));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "plainaddress",
            "missing-at.com",
            "user@",
            "@domain.com",
            "user@domain",
            "user name@domain.com",
            "user@dom ain.com",
        ] {
            assert_eq!(
                validate_email(email),
                Some("Please enter a valid email address".to_string()),
                "expected rejection for {email}"
            );
        }
    }

    #[test]
    fn well_formed_emails_pass() {
        for email in [
            "test@company.com",
            "first.last@sub.domain.org",
            "user+tag@inbox.im",
        ] {
            assert_eq!(validate_email(email), None, "expected pass for {email}");
        }
    }

    #[test]
    fn empty_password_is_required() {
        assert_eq!(
            validate_password(""),
            Some("Password is required".to_string())
        );
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            validate_password("Pass12!"),
            Some("Password must be at least 8 characters".to_string())
        );
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // Eight multi-byte characters must pass.
        assert_eq!(validate_password("pàsswörd"), None);
    }

    #[test]
    fn eight_or_more_characters_pass() {
        assert_eq!(validate_password("Password123!"), None);
        assert_eq!(validate_password("12345678"), None);
    }
}
