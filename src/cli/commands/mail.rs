use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use secrecy::SecretString;

use crate::api::email::MailConfig;

pub const ARG_EMAIL_HOST: &str = "email-host";
pub const ARG_EMAIL_PORT: &str = "email-port";
pub const ARG_EMAIL_SECURE: &str = "email-secure";
pub const ARG_EMAIL_USERNAME: &str = "email-username";
pub const ARG_EMAIL_PASSWORD: &str = "email-password";
pub const ARG_EMAIL_FROM: &str = "email-from";
pub const ARG_EMAIL_LOG_ONLY: &str = "email-log-only";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_EMAIL_HOST)
                .long("email-host")
                .help("SMTP host for verification emails")
                .env("EMAIL_HOST")
                .required_unless_present(ARG_EMAIL_LOG_ONLY),
        )
        .arg(
            Arg::new(ARG_EMAIL_PORT)
                .long("email-port")
                .help("SMTP port")
                .env("EMAIL_PORT")
                .default_value("587")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_EMAIL_SECURE)
                .long("email-secure")
                .help("Use implicit TLS instead of STARTTLS")
                .env("EMAIL_SECURE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_EMAIL_USERNAME)
                .long("email-username")
                .help("SMTP username")
                .env("EMAIL_USERNAME")
                .required_unless_present(ARG_EMAIL_LOG_ONLY),
        )
        .arg(
            Arg::new(ARG_EMAIL_PASSWORD)
                .long("email-password")
                .help("SMTP password")
                .env("EMAIL_PASSWORD")
                .required_unless_present(ARG_EMAIL_LOG_ONLY),
        )
        .arg(
            Arg::new(ARG_EMAIL_FROM)
                .long("email-from")
                .help("From address for outbound mail")
                .env("EMAIL_FROM")
                .required_unless_present(ARG_EMAIL_LOG_ONLY),
        )
        .arg(
            Arg::new(ARG_EMAIL_LOG_ONLY)
                .long("email-log-only")
                .help("Log verification codes instead of sending email (development)")
                .env("EMAIL_LOG_ONLY")
                .action(ArgAction::SetTrue),
        )
}

/// Resolve the mail arguments into an SMTP config, or `None` when running
/// with the log-only sender.
///
/// # Errors
/// Returns an error if SMTP arguments are missing while log-only is off.
pub fn parse(matches: &clap::ArgMatches) -> Result<Option<MailConfig>> {
    if matches.get_flag(ARG_EMAIL_LOG_ONLY) {
        return Ok(None);
    }

    Ok(Some(MailConfig {
        host: matches
            .get_one::<String>(ARG_EMAIL_HOST)
            .cloned()
            .context("missing required argument: --email-host")?,
        port: matches
            .get_one::<u16>(ARG_EMAIL_PORT)
            .copied()
            .unwrap_or(587),
        secure: matches.get_flag(ARG_EMAIL_SECURE),
        username: matches
            .get_one::<String>(ARG_EMAIL_USERNAME)
            .cloned()
            .context("missing required argument: --email-username")?,
        password: matches
            .get_one::<String>(ARG_EMAIL_PASSWORD)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --email-password")?,
        from_address: matches
            .get_one::<String>(ARG_EMAIL_FROM)
            .cloned()
            .context("missing required argument: --email-from")?,
    }))
}
