//! Verification code generation and validity checks.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};

/// How long a freshly issued code stays valid.
const CODE_TTL_HOURS: i64 = 1;

/// A short code mailed to the user, with its expiry.
#[derive(Debug, Clone)]
pub struct VerificationCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Generate a 6-character uppercase hex code from OS randomness,
/// expiring one hour from now. Collisions across users are acceptable;
/// codes are only ever compared against their own row.
pub fn generate() -> Result<VerificationCode> {
    let mut bytes = [0u8; 3];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate verification code")?;
    Ok(VerificationCode {
        code: hex::encode_upper(bytes),
        expires_at: Utc::now() + Duration::hours(CODE_TTL_HOURS),
    })
}

/// Whether a submitted code matches the stored one and is unexpired.
///
/// Missing code or expiry (already-verified rows) never validate.
#[must_use]
pub fn matches(
    stored_code: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    submitted: &str,
) -> bool {
    match (stored_code, expires_at) {
        (Some(code), Some(expiry)) => code == submitted && expiry > Utc::now(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{generate, matches};
    use anyhow::Result;
    use chrono::{Duration, Utc};

    #[test]
    fn generated_code_is_six_uppercase_hex_chars() -> Result<()> {
        let issued = generate()?;
        assert_eq!(issued.code.len(), 6);
        assert!(issued
            .code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert!(issued.code.chars().all(|c| c.is_ascii_hexdigit()));
        Ok(())
    }

    #[test]
    fn expiry_is_about_one_hour_out() -> Result<()> {
        let issued = generate()?;
        let delta = issued.expires_at - Utc::now();
        assert!(delta > Duration::minutes(59));
        assert!(delta <= Duration::hours(1));
        Ok(())
    }

    #[test]
    fn matching_code_before_expiry_validates() {
        let expiry = Utc::now() + Duration::minutes(30);
        assert!(matches(Some("A1B2C3"), Some(expiry), "A1B2C3"));
    }

    #[test]
    fn wrong_or_expired_code_fails() {
        let future = Utc::now() + Duration::minutes(30);
        let past = Utc::now() - Duration::minutes(1);
        assert!(!matches(Some("A1B2C3"), Some(future), "FFFFFF"));
        assert!(!matches(Some("A1B2C3"), Some(past), "A1B2C3"));
    }

    #[test]
    fn cleared_code_never_validates() {
        assert!(!matches(None, None, "A1B2C3"));
        assert!(!matches(Some("A1B2C3"), None, "A1B2C3"));
    }
}
