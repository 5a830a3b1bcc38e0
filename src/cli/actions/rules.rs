//! Fraud rule views.

use super::request_error;
use crate::{
    app_lib::ApiClient,
    cli::output::{OutputFormat, print_notice, render_rows},
    features::rules::{FraudRule, RuleForm, RulesWorkflow},
};
use anyhow::{Result, anyhow};
use tabled::Tabled;

#[derive(Debug)]
pub enum RulesCommand {
    List,
    Create(RuleForm),
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    rule_id: i64,
    #[tabled(rename = "Name")]
    rule_name: String,
    #[tabled(rename = "Description")]
    rule_description: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Risk")]
    risk_level: String,
    #[tabled(rename = "Precedence")]
    precedence: i64,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&FraudRule> for RuleRow {
    fn from(rule: &FraudRule) -> Self {
        Self {
            rule_id: rule.rule_id,
            rule_name: rule.rule_name.clone(),
            rule_description: rule.rule_description.clone().unwrap_or_default(),
            action: rule.action.to_uppercase(),
            risk_level: rule.risk_level.clone(),
            precedence: rule.precedence,
            status: if rule.active { "Active" } else { "Inactive" },
        }
    }
}

fn render(workflow: &RulesWorkflow, format: OutputFormat) -> Result<String> {
    let rules = workflow.rules();
    let rows: Vec<RuleRow> = rules.iter().map(RuleRow::from).collect();
    Ok(render_rows(rows, rules, format, "No fraud rules defined.")?)
}

/// # Errors
/// Returns load failures, invalid forms and rejected submissions.
pub async fn run(api: &ApiClient, command: RulesCommand, format: OutputFormat) -> Result<()> {
    let mut workflow = RulesWorkflow::new();
    if let RulesCommand::Create(form) = command {
        *workflow.form_mut() = form;
        let notice = workflow.submit(api).await;
        if notice.is_error() {
            return Err(anyhow!("{}", notice.message));
        }
        print_notice(&notice);
    } else {
        workflow.load(api).await;
    }

    if let Some(err) = workflow.state().failure() {
        return Err(request_error(err));
    }
    println!("{}", render(&workflow, format)?);
    Ok(())
}
