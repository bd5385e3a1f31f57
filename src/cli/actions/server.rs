use crate::{api, api::email::MailConfig, cli::globals::GlobalArgs};
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub database_host: String,
    pub database_port: u16,
    pub database_username: String,
    pub database_password: SecretString,
    pub database_name: String,
    pub mail: Option<MailConfig>,
    pub token_secret: SecretString,
    pub token_ttl_seconds: i64,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the DSN cannot be assembled or the server fails to
/// start.
pub async fn execute(args: Args) -> Result<()> {
    // Credentials go through Url setters so reserved characters survive.
    let mut dsn = Url::parse(&format!(
        "postgres://{}:{}/{}",
        args.database_host, args.database_port, args.database_name
    ))?;

    dsn.set_username(&args.database_username)
        .map_err(|()| anyhow!("Error setting username"))?;

    dsn.set_password(Some(args.database_password.expose_secret()))
        .map_err(|()| anyhow!("Error setting password"))?;

    let globals = GlobalArgs::new(args.token_secret, args.token_ttl_seconds);

    debug!("Global args: {:?}", globals);

    api::new(args.port, dsn.to_string(), &globals, args.mail).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dsn_escapes_credentials() -> Result<()> {
        let mut dsn = Url::parse("postgres://localhost:5432/cadastro")?;
        dsn.set_username("user@corp")
            .map_err(|()| anyhow!("username"))?;
        dsn.set_password(Some("p@ss word"))
            .map_err(|()| anyhow!("password"))?;
        let rendered = dsn.to_string();
        assert!(rendered.contains("user%40corp"));
        assert!(!rendered.contains("p@ss word"));
        assert!(rendered.ends_with("@localhost:5432/cadastro"));
        Ok(())
    }
}
