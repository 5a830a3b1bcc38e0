//! Administrator subcommands.

use clap::{Arg, Command, value_parser};

pub const ARG_LOG_ID: &str = "log-id";
pub const ARG_ACTION: &str = "action";
pub const ARG_RULE_NAME: &str = "name";
pub const ARG_RULE_DESCRIPTION: &str = "description";
pub const ARG_RISK_LEVEL: &str = "risk-level";
pub const ARG_PRECEDENCE: &str = "precedence";

fn log_id_arg() -> Arg {
    Arg::new(ARG_LOG_ID)
        .help("Fraud log id")
        .required(true)
        .value_parser(value_parser!(i64))
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(Command::new("dashboard").about("Show dashboard totals"))
        .subcommand(Command::new("users").about("List registered users"))
        .subcommand(
            Command::new("fraud-logs")
                .about("Review and resolve fraud alerts")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List alerts in triage order"))
                .subcommand(
                    Command::new("apply")
                        .about("Apply an action to the account behind an alert")
                        .arg(log_id_arg())
                        .arg(
                            Arg::new(ARG_ACTION)
                                .help("block, restrict or limit")
                                .required(true),
                        ),
                )
                .subcommand(
                    Command::new("resolve")
                        .about("Mark a single alert resolved")
                        .arg(log_id_arg()),
                )
                .subcommand(Command::new("triage").about("Interactive triage session")),
        )
        .subcommand(
            Command::new("rules")
                .about("Manage fraud rules")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List fraud rules"))
                .subcommand(
                    Command::new("create")
                        .about("Create a fraud rule")
                        .arg(Arg::new(ARG_RULE_NAME).long(ARG_RULE_NAME).required(true))
                        .arg(
                            Arg::new(ARG_RULE_DESCRIPTION)
                                .long(ARG_RULE_DESCRIPTION)
                                .required(true),
                        )
                        .arg(
                            Arg::new(ARG_ACTION)
                                .long(ARG_ACTION)
                                .help("block, restrict or limit")
                                .required(true),
                        )
                        .arg(
                            Arg::new(ARG_RISK_LEVEL)
                                .long(ARG_RISK_LEVEL)
                                .help("high, medium or low")
                                .required(true),
                        )
                        .arg(
                            Arg::new(ARG_PRECEDENCE)
                                .long(ARG_PRECEDENCE)
                                .help("Evaluation order, 1 first")
                                .required(true),
                        ),
                ),
        )
}
