use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Named log levels accepted by `CADASTRO_LOG_LEVEL`, in verbosity order.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
            return Err("invalid log level".to_string());
        }

        let lowered = level.to_lowercase();
        LEVEL_NAMES
            .iter()
            .position(|name| *name == lowered)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| "invalid log level".to_string())
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("CADASTRO_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::validator_log_level;
    use clap::{Arg, Command};

    fn parse(value: &str) -> Result<u8, String> {
        let command = Command::new("test").arg(
            Arg::new("level")
                .long("level")
                .value_parser(validator_log_level()),
        );
        command
            .try_get_matches_from(vec!["test", "--level", value])
            .map(|matches| matches.get_one::<u8>("level").copied().unwrap_or(0))
            .map_err(|err| err.to_string())
    }

    #[test]
    fn accepts_names_and_numbers() {
        assert_eq!(parse("error"), Ok(0));
        assert_eq!(parse("WARN"), Ok(1));
        assert_eq!(parse("info"), Ok(2));
        assert_eq!(parse("3"), Ok(3));
        assert_eq!(parse("trace"), Ok(4));
    }

    #[test]
    fn rejects_unknown_levels() {
        assert!(parse("verbose").is_err());
        assert!(parse("42").is_err());
    }
}
