//! Input validation shared by handlers before anything touches the store.

use regex::Regex;

/// Normalize an email for lookup/uniqueness checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// Business identifiers are exactly 14 digits.
#[must_use]
pub fn valid_business_id(value: &str) -> bool {
    value.len() == 14 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Postal codes are exactly 8 digits.
#[must_use]
pub fn valid_postal_code(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Required text fields must be non-empty after trimming.
#[must_use]
pub fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }

    #[test]
    fn business_id_requires_fourteen_digits() {
        assert!(valid_business_id("12345678000195"));
        assert!(!valid_business_id("1234567800019"));
        assert!(!valid_business_id("12345678000195x"));
        assert!(!valid_business_id("12.345.678/0001-95"));
    }

    #[test]
    fn postal_code_requires_eight_digits() {
        assert!(valid_postal_code("01310100"));
        assert!(!valid_postal_code("0131010"));
        assert!(!valid_postal_code("01310-100"));
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert!(non_empty("x"));
        assert!(!non_empty("   "));
        assert!(!non_empty(""));
    }
}
