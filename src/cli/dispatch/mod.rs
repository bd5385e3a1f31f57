//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the server action with its full
//! configuration state.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{database, mail, token};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let database_opts = database::Options::parse(matches)?;
    let mail_config = mail::parse(matches)?;
    let token_opts = token::Options::parse(matches)?;

    Ok(Action::Server(Box::new(Args {
        port,
        database_host: database_opts.host,
        database_port: database_opts.port,
        database_username: database_opts.username,
        database_password: database_opts.password,
        database_name: database_opts.name,
        mail: mail_config,
        token_secret: token_opts.secret,
        token_ttl_seconds: token_opts.ttl_seconds,
    })))
}
