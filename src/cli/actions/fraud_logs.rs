//! Fraud alert views: listing, one-shot apply and resolve, and an
//! interactive triage loop over a single workflow instance.

use super::request_error;
use crate::{
    app_lib::{ApiClient, AppError, Notice},
    cli::output::{OutputFormat, print_notice, render_rows},
    features::fraud_logs::{FraudAction, FraudAlert, TriageWorkflow, client},
};
use anyhow::{Result, anyhow};
use std::{io::Write, str::FromStr};
use tabled::Tabled;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const NO_INCIDENTS: &str = "No pending fraud incidents.";
const TRIAGE_HELP: &str = "Commands:
  list                     show alerts in triage order
  select <log_id> <action> choose block, restrict or limit for a row
  apply <log_id>           apply the chosen action to the row's account
  reload                   fetch the list again (drops selections)
  help                     show this help
  quit                     leave triage";

#[derive(Debug)]
pub enum FraudLogsCommand {
    List,
    Apply { log_id: i64, action: String },
    Resolve { log_id: i64 },
    Triage,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Log")]
    log_id: i64,
    #[tabled(rename = "Account")]
    account_id: i64,
    #[tabled(rename = "Transaction")]
    transaction_id: i64,
    #[tabled(rename = "Rule")]
    detected_rule: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Time")]
    transaction_time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Selected")]
    selected: String,
}

impl AlertRow {
    fn new(alert: &FraudAlert, workflow: &TriageWorkflow) -> Self {
        let selected = if workflow.is_in_flight(alert.log_id) {
            "applying".to_string()
        } else {
            workflow
                .pending_for(alert.log_id)
                .map_or_else(|| "-".to_string(), |action| action.label().to_string())
        };
        Self {
            log_id: alert.log_id,
            account_id: alert.account_id,
            transaction_id: alert.transaction_id,
            detected_rule: alert.detected_rule.clone(),
            amount: format!("${:.2}", alert.amount),
            transaction_time: alert.transaction_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            status: alert.status.clone(),
            selected,
        }
    }
}

/// One line typed at the triage prompt.
#[derive(Debug, PartialEq, Eq)]
enum TriageCommand {
    List,
    Select { log_id: i64, action: FraudAction },
    Apply { log_id: i64 },
    Reload,
    Help,
    Quit,
}

impl FromStr for TriageCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["list" | "ls"] => Ok(Self::List),
            ["select", log_id, action] => Ok(Self::Select {
                log_id: parse_log_id(log_id)?,
                action: action.parse()?,
            }),
            ["apply", log_id] => Ok(Self::Apply {
                log_id: parse_log_id(log_id)?,
            }),
            ["reload"] => Ok(Self::Reload),
            ["help" | "?"] | [] => Ok(Self::Help),
            ["quit" | "exit" | "q"] => Ok(Self::Quit),
            _ => Err(AppError::Validation(format!(
                "Unrecognized command: {}. Type `help`.",
                line.trim()
            ))),
        }
    }
}

fn parse_log_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid log id: {raw}")))
}

fn render(workflow: &TriageWorkflow, format: OutputFormat) -> Result<String> {
    let alerts = workflow.alerts();
    let rows: Vec<AlertRow> = alerts
        .iter()
        .map(|alert| AlertRow::new(alert, workflow))
        .collect();
    Ok(render_rows(rows, alerts, format, NO_INCIDENTS)?)
}

async fn load(api: &ApiClient, workflow: &mut TriageWorkflow) -> Result<()> {
    workflow.load(api).await;
    match workflow.state().failure() {
        Some(err) => Err(request_error(err)),
        None => Ok(()),
    }
}

/// # Errors
/// Returns load failures, validation failures and failed applies.
pub async fn run(api: &ApiClient, command: FraudLogsCommand, format: OutputFormat) -> Result<()> {
    match command {
        FraudLogsCommand::List => {
            let mut workflow = TriageWorkflow::new();
            load(api, &mut workflow).await?;
            println!("{}", render(&workflow, format)?);
            Ok(())
        }
        FraudLogsCommand::Apply { log_id, action } => {
            let action = action.parse::<FraudAction>()?;
            let mut workflow = TriageWorkflow::new();
            load(api, &mut workflow).await?;
            workflow.select_action(log_id, action)?;
            let notice = workflow.apply(api, log_id).await;
            if notice.is_error() {
                return Err(anyhow!("{}", notice.message));
            }
            print_notice(&notice);
            print_notice(&Notice::info(format!(
                "{} alert(s) remain.",
                workflow.alerts().len()
            )));
            Ok(())
        }
        FraudLogsCommand::Resolve { log_id } => {
            let ack = client::resolve_fraud(api, log_id)
                .await
                .map_err(|err| request_error(&err))?;
            let message = ack
                .message
                .unwrap_or_else(|| format!("Fraud log #{log_id} resolved."));
            print_notice(&Notice::success(message));
            Ok(())
        }
        FraudLogsCommand::Triage => triage(api, format).await,
    }
}

async fn triage(api: &ApiClient, format: OutputFormat) -> Result<()> {
    let mut workflow = TriageWorkflow::new();
    load(api, &mut workflow).await?;
    println!("{}", render(&workflow, format)?);
    println!("{TRIAGE_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("triage> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match line.parse::<TriageCommand>() {
            Ok(command) => command,
            Err(err) => {
                print_notice(&Notice::error(err.message()));
                continue;
            }
        };
        debug!(?command, "triage command");

        match command {
            TriageCommand::List => println!("{}", render(&workflow, format)?),
            TriageCommand::Select { log_id, action } => {
                match workflow.select_action(log_id, action) {
                    Ok(()) => print_notice(&Notice::info(format!(
                        "{} selected for fraud log #{log_id}.",
                        action.label()
                    ))),
                    Err(err) => print_notice(&Notice::error(err.message())),
                }
            }
            TriageCommand::Apply { log_id } => {
                let notice = workflow.apply(api, log_id).await;
                print_notice(&notice);
                if !notice.is_error() {
                    println!("{}", render(&workflow, format)?);
                }
            }
            TriageCommand::Reload => {
                workflow.load(api).await;
                match workflow.load_error() {
                    Some(message) => print_notice(&Notice::error(message)),
                    None => println!("{}", render(&workflow, format)?),
                }
            }
            TriageCommand::Help => println!("{TRIAGE_HELP}"),
            TriageCommand::Quit => break,
        }
    }

    workflow.teardown();
    Ok(())
}
