//! Verification email delivery.
//!
//! The [`EmailSender`] trait is the seam between the lifecycle service and
//! the transport. Production uses [`LettreEmailSender`] over SMTP; local
//! development uses [`LogEmailSender`], which logs the payload and
//! succeeds. Delivery is awaited inside create/resend, so a transport
//! failure fails the whole operation.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

const VERIFICATION_SUBJECT: &str = "Email Verification Code";

/// Email delivery abstraction used by the user lifecycle service.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a verification code or return an error.
    async fn send_verification_code(&self, to_email: &str, code: &str) -> Result<()>;
}

/// Local dev sender that logs the code instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_verification_code(&self, to_email: &str, code: &str) -> Result<()> {
        info!(to_email = %to_email, code = %code, "verification email send stub");
        Ok(())
    }
}

/// SMTP transport settings. `secure` selects implicit TLS; otherwise the
/// transport starts plain and upgrades via STARTTLS.
#[derive(Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// SMTP-backed sender.
pub struct LettreEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl LettreEmailSender {
    /// # Errors
    /// Returns an error if the SMTP relay parameters are invalid.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .context("failed to configure SMTP relay")?;

        Ok(Self {
            mailer: builder
                .port(config.port)
                .credentials(credentials)
                .build(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for LettreEmailSender {
    async fn send_verification_code(&self, to_email: &str, code: &str) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| anyhow!("invalid from address: {}", self.from_address))?,
            )
            .to(to_email
                .parse()
                .map_err(|_| anyhow!("invalid recipient address: {to_email}"))?)
            .subject(VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your verification code is {code}. It expires in one hour."
            ))
            .context("failed to build verification email")?;

        self.mailer
            .send(message)
            .await
            .context("failed to send verification email")?;

        info!(to_email = %to_email, "verification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EmailSender, LogEmailSender, MailConfig};
    use anyhow::Result;
    use secrecy::SecretString;

    #[tokio::test]
    async fn log_sender_always_succeeds() -> Result<()> {
        LogEmailSender
            .send_verification_code("alice@example.com", "A1B2C3")
            .await
    }

    #[test]
    fn mail_config_debug_redacts_password() {
        let config = MailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: false,
            username: "mailer".to_string(),
            password: SecretString::from("hunter2"),
            from_address: "noreply@example.com".to_string(),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("hunter2"));
    }
}
