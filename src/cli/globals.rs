use secrecy::SecretString;

/// Process-wide configuration resolved once at startup and passed by
/// dependency injection; business logic never reads the environment.
#[derive(Clone)]
pub struct GlobalArgs {
    pub token_secret: SecretString,
    pub token_ttl_seconds: i64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(token_secret: SecretString, token_ttl_seconds: i64) -> Self {
        Self {
            token_secret,
            token_ttl_seconds,
        }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("token_secret", &"***")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("signing-secret"), 60);
        assert_eq!(args.token_secret.expose_secret(), "signing-secret");
        assert_eq!(args.token_ttl_seconds, 60);
    }

    #[test]
    fn debug_redacts_secret() {
        let args = GlobalArgs::new(SecretString::from("signing-secret"), 60);
        let rendered = format!("{args:?}");
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("signing-secret"));
    }
}
