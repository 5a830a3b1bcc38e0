//! Rule list with its create form. A created rule shows up only after the
//! list is reloaded from the server.

use super::{
    client,
    types::{FraudRule, NewFraudRule, RiskLevel, RuleAction},
};
use crate::app_lib::{ApiClient, AppError, Lifecycle, Loadable, Notice, Ticket};
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleField {
    Name,
    Description,
    Action,
    RiskLevel,
    Precedence,
}

/// Raw form input, validated only on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleForm {
    pub rule_name: String,
    pub rule_description: String,
    pub action: String,
    pub risk_level: String,
    pub precedence: String,
}

impl RuleForm {
    pub fn set_field(&mut self, field: RuleField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RuleField::Name => self.rule_name = value,
            RuleField::Description => self.rule_description = value,
            RuleField::Action => self.action = value,
            RuleField::RiskLevel => self.risk_level = value,
            RuleField::Precedence => self.precedence = value,
        }
    }

    /// # Errors
    /// Returns `AppError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<NewFraudRule, AppError> {
        let rule_name = self.rule_name.trim();
        if rule_name.is_empty() {
            return Err(AppError::Validation("Rule name is required.".to_string()));
        }
        let rule_description = self.rule_description.trim();
        if rule_description.is_empty() {
            return Err(AppError::Validation("Rule description is required.".to_string()));
        }
        let action = self.action.parse::<RuleAction>()?;
        let risk_level = self.risk_level.parse::<RiskLevel>()?;
        let precedence = self
            .precedence
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|precedence| *precedence >= 1)
            .ok_or_else(|| {
                AppError::Validation("Precedence must be a whole number of at least 1.".to_string())
            })?;

        Ok(NewFraudRule {
            rule_name: rule_name.to_string(),
            rule_description: rule_description.to_string(),
            action,
            risk_level,
            precedence,
        })
    }
}

#[derive(Debug, Default)]
pub struct RulesWorkflow {
    rules: Loadable<Vec<FraudRule>>,
    form: RuleForm,
    submitting: bool,
    lifecycle: Lifecycle,
}

impl RulesWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &Loadable<Vec<FraudRule>> {
        &self.rules
    }

    #[must_use]
    pub fn rules(&self) -> &[FraudRule] {
        self.rules.value().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub const fn form(&self) -> &RuleForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RuleForm {
        &mut self.form
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn load(&mut self, api: &ApiClient) {
        let ticket = self.begin_load();
        let result = client::list_rules(api).await;
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.rules = Loadable::Loading;
        self.lifecycle.advance()
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<FraudRule>, AppError>,
    ) -> bool {
        if !self.lifecycle.accepts(ticket) {
            debug!("ignoring stale rule load");
            return false;
        }
        self.rules = match result {
            Ok(rules) => Loadable::Loaded(rules),
            Err(err) => {
                warn!(error = %err, "failed to load fraud rules");
                Loadable::Failed(err)
            }
        };
        true
    }

    /// # Errors
    /// Returns a notice when a submission is running or the form is invalid.
    pub fn begin_submit(&mut self) -> Result<NewFraudRule, Notice> {
        if self.submitting {
            return Err(Notice::info("A rule is already being created."));
        }
        let rule = self.form.validate().map_err(|err| Notice::error(err.message()))?;
        self.submitting = true;
        Ok(rule)
    }

    /// Clears the form on success. The caller reloads the list afterwards.
    pub fn finish_submit(
        &mut self,
        rule: &NewFraudRule,
        result: Result<Value, AppError>,
    ) -> Notice {
        self.submitting = false;
        match result {
            Ok(_) => {
                info!(rule = %rule.rule_name, precedence = rule.precedence, "fraud rule created");
                self.form = RuleForm::default();
                Notice::success(format!("Rule \"{}\" created.", rule.rule_name))
            }
            Err(err) => {
                warn!(error = %err, "fraud rule creation failed");
                Notice::error(err.message())
            }
        }
    }

    /// Submits the form and reloads the list on success.
    pub async fn submit(&mut self, api: &ApiClient) -> Notice {
        let rule = match self.begin_submit() {
            Ok(rule) => rule,
            Err(notice) => return notice,
        };
        let result = client::create_rule(api, &rule).await;
        let created = result.is_ok();
        let notice = self.finish_submit(&rule, result);
        if created {
            self.load(api).await;
        }
        notice
    }

    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
    }
}
