//! Sign-in, sign-up and navigation subcommands.

use clap::{Arg, Command};

pub const ARG_USERNAME: &str = "username";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_PATH: &str = "path";

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Password; prompted for when omitted")
        .env("FRAUDESK_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(Arg::new(ARG_USERNAME).required(true))
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("signup")
                .about("Create a customer login")
                .arg(Arg::new(ARG_USERNAME).required(true))
                .arg(Arg::new(ARG_EMAIL).required(true))
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the stored session's role"))
        .subcommand(
            Command::new("open")
                .about("Open a view by its path, e.g. /admin/fraud-logs")
                .arg(Arg::new(ARG_PATH).required(true)),
        )
}
