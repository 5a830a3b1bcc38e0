//! Command-line argument dispatch.
//!
//! This module maps validated CLI matches to an action plus the global
//! options every action runs with.

use crate::cli::{
    actions::{
        Action,
        accounts::{AccountsCommand, TransferArgs},
        auth::{LoginArgs, SignupArgs},
        fraud_logs::FraudLogsCommand,
        rules::RulesCommand,
    },
    commands::{admin, auth, customer, session},
    globals::GlobalArgs,
    output::OutputFormat,
};
use crate::features::{accounts::MovementKind, rules::RuleForm};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: {id}"))
}

fn required_id(matches: &ArgMatches, id: &str) -> Result<i64> {
    matches
        .get_one::<i64>(id)
        .copied()
        .with_context(|| format!("missing required argument: {id}"))
}

fn password(matches: &ArgMatches) -> Option<SecretString> {
    matches
        .get_one::<String>(auth::ARG_PASSWORD)
        .map(|password| SecretString::from(password.clone()))
}

fn fraud_logs(matches: &ArgMatches) -> Result<FraudLogsCommand> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(FraudLogsCommand::List),
        Some(("apply", sub_m)) => Ok(FraudLogsCommand::Apply {
            log_id: required_id(sub_m, admin::ARG_LOG_ID)?,
            action: required(sub_m, admin::ARG_ACTION)?,
        }),
        Some(("resolve", sub_m)) => Ok(FraudLogsCommand::Resolve {
            log_id: required_id(sub_m, admin::ARG_LOG_ID)?,
        }),
        Some(("triage", _)) => Ok(FraudLogsCommand::Triage),
        _ => Err(anyhow!("unknown fraud-logs command")),
    }
}

fn rules(matches: &ArgMatches) -> Result<RulesCommand> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(RulesCommand::List),
        Some(("create", sub_m)) => Ok(RulesCommand::Create(RuleForm {
            rule_name: required(sub_m, admin::ARG_RULE_NAME)?,
            rule_description: required(sub_m, admin::ARG_RULE_DESCRIPTION)?,
            action: required(sub_m, admin::ARG_ACTION)?,
            risk_level: required(sub_m, admin::ARG_RISK_LEVEL)?,
            precedence: required(sub_m, admin::ARG_PRECEDENCE)?,
        })),
        _ => Err(anyhow!("unknown rules command")),
    }
}

fn accounts(matches: &ArgMatches) -> Result<AccountsCommand> {
    let movement = |sub_m: &ArgMatches, kind| -> Result<AccountsCommand> {
        Ok(AccountsCommand::Move {
            account_id: required_id(sub_m, customer::ARG_ACCOUNT_ID)?,
            kind,
            amount: required(sub_m, customer::ARG_AMOUNT)?,
        })
    };

    match matches.subcommand() {
        None | Some(("list", _)) => Ok(AccountsCommand::List),
        Some(("create", _)) => Ok(AccountsCommand::Create),
        Some(("deposit", sub_m)) => movement(sub_m, MovementKind::Deposit),
        Some(("withdraw", sub_m)) => movement(sub_m, MovementKind::Withdraw),
        _ => Err(anyhow!("unknown accounts command")),
    }
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is
/// unknown.
pub fn handler(matches: &ArgMatches) -> Result<(Action, GlobalArgs)> {
    let options = session::Options::parse(matches);
    let format = options
        .format
        .parse::<OutputFormat>()
        .map_err(|err| anyhow!("{err}"))?;
    let globals = GlobalArgs::new(options.api_url, options.session_file, format);

    let action = match matches.subcommand() {
        Some(("login", sub_m)) => Action::Login(LoginArgs {
            username: required(sub_m, auth::ARG_USERNAME)?,
            password: password(sub_m),
        }),
        Some(("signup", sub_m)) => Action::Signup(SignupArgs {
            username: required(sub_m, auth::ARG_USERNAME)?,
            email: required(sub_m, auth::ARG_EMAIL)?,
            password: password(sub_m),
        }),
        Some(("logout", _)) => Action::Logout,
        Some(("whoami", _)) => Action::Whoami,
        Some(("open", sub_m)) => Action::Open {
            path: required(sub_m, auth::ARG_PATH)?,
        },
        Some(("dashboard", _)) => Action::Dashboard,
        Some(("users", _)) => Action::Users,
        Some(("fraud-logs", sub_m)) => Action::FraudLogs(fraud_logs(sub_m)?),
        Some(("rules", sub_m)) => Action::Rules(rules(sub_m)?),
        Some(("accounts", sub_m)) => Action::Accounts(accounts(sub_m)?),
        Some(("transactions", _)) => Action::Transactions,
        Some(("transfer", sub_m)) => Action::Transfer(TransferArgs {
            source: required(sub_m, customer::ARG_SOURCE)?,
            destination: required(sub_m, customer::ARG_DESTINATION)?,
            amount: required(sub_m, customer::ARG_AMOUNT)?,
        }),
        _ => return Err(anyhow!("missing command; see `fraudesk --help`")),
    };

    Ok((action, globals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn dispatch(args: &[&str]) -> Result<(Action, GlobalArgs)> {
        let mut argv = vec!["fraudesk"];
        argv.extend_from_slice(args);
        let matches = crate::cli::commands::new().get_matches_from(argv);
        handler(&matches)
    }

    #[test]
    fn login_reads_password_from_env() {
        temp_env::with_vars([("FRAUDESK_PASSWORD", Some("hunter2"))], || {
            let result = dispatch(&["login", "root"]);
            let Ok((Action::Login(args), _)) = result else {
                panic!("expected login action");
            };
            assert_eq!(args.username, "root");
            assert_eq!(
                args.password.as_ref().map(|p| p.expose_secret().to_string()),
                Some("hunter2".to_string())
            );
        });
    }

    #[test]
    fn login_without_password_prompts_later() {
        temp_env::with_vars([("FRAUDESK_PASSWORD", None::<&str>)], || {
            let result = dispatch(&["login", "root"]);
            assert!(matches!(result, Ok((Action::Login(LoginArgs { password: None, .. }), _))));
        });
    }

    #[test]
    fn movement_keeps_raw_amount() {
        let result = dispatch(&["accounts", "withdraw", "3", "abc"]);
        let Ok((Action::Accounts(AccountsCommand::Move { account_id, kind, amount }), _)) = result
        else {
            panic!("expected movement");
        };
        assert_eq!(account_id, 3);
        assert_eq!(kind, MovementKind::Withdraw);
        assert_eq!(amount, "abc");
    }

    #[test]
    fn bare_accounts_lists() {
        let result = dispatch(&["accounts"]);
        assert!(matches!(result, Ok((Action::Accounts(AccountsCommand::List), _))));
    }

    #[test]
    fn rule_create_collects_form() {
        let result = dispatch(&[
            "rules",
            "create",
            "--name",
            "Velocity",
            "--description",
            "Five transfers in a minute",
            "--action",
            "limit",
            "--risk-level",
            "medium",
            "--precedence",
            "2",
        ]);
        let Ok((Action::Rules(RulesCommand::Create(form)), _)) = result else {
            panic!("expected rule create");
        };
        assert_eq!(form.rule_name, "Velocity");
        assert_eq!(form.precedence, "2");
    }

    #[test]
    fn globals_carry_format_and_paths() {
        temp_env::with_vars(
            [
                ("FRAUDESK_FORMAT", None::<&str>),
                ("FRAUDESK_API_URL", None::<&str>),
                ("FRAUDESK_SESSION_FILE", None::<&str>),
            ],
            || {
                let result = dispatch(&[
                    "--format",
                    "json",
                    "--session-file",
                    "/tmp/s.json",
                    "whoami",
                ]);
                let Ok((Action::Whoami, globals)) = result else {
                    panic!("expected whoami");
                };
                assert_eq!(globals.format, OutputFormat::Json);
                assert_eq!(globals.session_file.as_deref(), Some("/tmp/s.json"));
                assert_eq!(globals.api_url, None);
            },
        );
    }
}
