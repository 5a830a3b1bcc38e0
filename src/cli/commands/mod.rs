pub mod admin;
pub mod auth;
pub mod customer;
pub mod logging;
pub mod session;

use clap::{
    ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!(
            "{} - {}",
            env!("CARGO_PKG_VERSION"),
            crate::app_lib::GIT_COMMIT_HASH
        )
        .into_boxed_str(),
    );

    let command = Command::new("fraudesk")
        .about("Fraud triage and account operations console")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = session::with_args(command);
    let command = auth::with_subcommands(command);
    let command = admin::with_subcommands(command);
    let command = customer::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "fraudesk");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Fraud triage and account operations console".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_fraud_logs_apply() {
        let matches = new().get_matches_from(vec![
            "fraudesk",
            "--api-url",
            "http://bank.test/api",
            "fraud-logs",
            "apply",
            "7",
            "block",
        ]);

        assert_eq!(
            matches.get_one::<String>(session::ARG_API_URL).cloned(),
            Some("http://bank.test/api".to_string())
        );
        let Some(("fraud-logs", fraud)) = matches.subcommand() else {
            panic!("expected fraud-logs");
        };
        let Some(("apply", apply)) = fraud.subcommand() else {
            panic!("expected apply");
        };
        assert_eq!(apply.get_one::<i64>(admin::ARG_LOG_ID).copied(), Some(7));
        assert_eq!(
            apply.get_one::<String>(admin::ARG_ACTION).cloned(),
            Some("block".to_string())
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let matches =
            new().get_matches_from(vec!["fraudesk", "accounts", "list", "--format", "json", "-vv"]);
        let Some(("accounts", accounts)) = matches.subcommand() else {
            panic!("expected accounts");
        };
        assert_eq!(
            accounts.get_one::<String>(session::ARG_FORMAT).cloned(),
            Some("json".to_string())
        );
        assert_eq!(accounts.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));
    }

    #[test]
    fn test_negative_amount_reaches_validation() {
        let result = new().try_get_matches_from(vec!["fraudesk", "accounts", "deposit", "3", "-5"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("FRAUDESK_API_URL", Some("https://bank.test/api")),
                ("FRAUDESK_SESSION_FILE", Some("/tmp/fraudesk-session.json")),
                ("FRAUDESK_FORMAT", Some("json")),
                ("FRAUDESK_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["fraudesk", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>(session::ARG_API_URL).cloned(),
                    Some("https://bank.test/api".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(session::ARG_SESSION_FILE).cloned(),
                    Some("/tmp/fraudesk-session.json".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(session::ARG_FORMAT).cloned(),
                    Some("json".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("FRAUDESK_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["fraudesk", "logout"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = new().try_get_matches_from(vec!["fraudesk", "--format", "yaml", "whoami"]);
        assert!(result.is_err());
    }
}
