//! Customer subcommands.

use clap::{Arg, Command, value_parser};

pub const ARG_ACCOUNT_ID: &str = "account-id";
pub const ARG_AMOUNT: &str = "amount";
pub const ARG_SOURCE: &str = "source";
pub const ARG_DESTINATION: &str = "destination";

fn movement(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new(ARG_ACCOUNT_ID)
                .required(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(Arg::new(ARG_AMOUNT).required(true).allow_hyphen_values(true))
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("accounts")
                .about("List and fund your accounts")
                .subcommand(Command::new("list").about("List your accounts"))
                .subcommand(Command::new("create").about("Open a new account"))
                .subcommand(movement("deposit", "Deposit into an account"))
                .subcommand(movement("withdraw", "Withdraw from an account")),
        )
        .subcommand(Command::new("transactions").about("List your transactions"))
        .subcommand(
            Command::new("transfer")
                .about("Move funds between accounts")
                .arg(Arg::new(ARG_SOURCE).required(true))
                .arg(Arg::new(ARG_DESTINATION).required(true))
                .arg(Arg::new(ARG_AMOUNT).required(true).allow_hyphen_values(true)),
        )
}
