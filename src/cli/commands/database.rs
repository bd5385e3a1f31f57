use anyhow::{Context, Result};
use clap::{Arg, Command};
use secrecy::SecretString;

pub const ARG_DATABASE_HOST: &str = "database-host";
pub const ARG_DATABASE_PORT: &str = "database-port";
pub const ARG_DATABASE_USERNAME: &str = "database-username";
pub const ARG_DATABASE_PASSWORD: &str = "database-password";
pub const ARG_DATABASE_NAME: &str = "database-name";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DATABASE_HOST)
                .long("database-host")
                .help("Database host")
                .env("DATABASE_HOST")
                .default_value("localhost"),
        )
        .arg(
            Arg::new(ARG_DATABASE_PORT)
                .long("database-port")
                .help("Database port")
                .env("DATABASE_PORT")
                .default_value("5432")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DATABASE_USERNAME)
                .long("database-username")
                .help("Database username")
                .env("DATABASE_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DATABASE_PASSWORD)
                .long("database-password")
                .help("Database password")
                .env("DATABASE_PASSWORD")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DATABASE_NAME)
                .long("database-name")
                .help("Database name")
                .env("DATABASE_NAME")
                .required(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
}

impl Options {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        Ok(Self {
            host: matches
                .get_one::<String>(ARG_DATABASE_HOST)
                .cloned()
                .context("missing required argument: --database-host")?,
            port: matches
                .get_one::<u16>(ARG_DATABASE_PORT)
                .copied()
                .unwrap_or(5432),
            username: matches
                .get_one::<String>(ARG_DATABASE_USERNAME)
                .cloned()
                .context("missing required argument: --database-username")?,
            password: matches
                .get_one::<String>(ARG_DATABASE_PASSWORD)
                .cloned()
                .map(SecretString::from)
                .context("missing required argument: --database-password")?,
            name: matches
                .get_one::<String>(ARG_DATABASE_NAME)
                .cloned()
                .context("missing required argument: --database-name")?,
        })
    }
}
