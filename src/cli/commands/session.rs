//! Arguments shared by every subcommand: where the backend lives, where the
//! session record is kept and how results are printed.

use clap::{Arg, ArgMatches, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_FORMAT: &str = "format";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub api_url: Option<String>,
    pub session_file: Option<String>,
    pub format: String,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_file: matches.get_one::<String>(ARG_SESSION_FILE).cloned(),
            format: matches
                .get_one::<String>(ARG_FORMAT)
                .cloned()
                .unwrap_or_else(|| "table".to_string()),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Backend API base URL")
                .long_help("Backend API base URL, e.g. http://127.0.0.1:5000/api")
                .env("FRAUDESK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Path of the stored session record")
                .long_help(concat!(
                    "Path of the stored session record. Defaults to ",
                    "fraudesk/session.json under the platform config directory."
                ))
                .env("FRAUDESK_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_FORMAT)
                .long(ARG_FORMAT)
                .help("Output format")
                .env("FRAUDESK_FORMAT")
                .value_parser(["table", "json"])
                .default_value("table")
                .global(true),
        )
}
