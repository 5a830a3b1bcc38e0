//! Customer views: accounts with deposit and withdraw, transactions and
//! transfers.

use super::request_error;
use crate::{
    app_lib::{ApiClient, Loadable, Notice},
    cli::output::{OutputFormat, print_notice, render_rows},
    features::accounts::{
        Account, FundsWorkflow, MovementKind, Transaction, TransferField, TransferForm, client,
    },
};
use anyhow::{Result, anyhow};
use tabled::Tabled;

#[derive(Debug)]
pub enum AccountsCommand {
    List,
    Create,
    Move {
        account_id: i64,
        kind: MovementKind,
        amount: String,
    },
}

/// Raw transfer input; validated by the transfer form.
#[derive(Debug)]
pub struct TransferArgs {
    pub source: String,
    pub destination: String,
    pub amount: String,
}

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    account_id: i64,
    #[tabled(rename = "Number")]
    account_number: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Risk")]
    risk: &'static str,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            account_number: account.account_number.clone(),
            balance: format!("${:.2}", account.balance),
            status: account.status_label(),
            risk: account.risk_label(),
        }
    }
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    transaction_id: i64,
    #[tabled(rename = "Account")]
    account_id: i64,
    #[tabled(rename = "Type")]
    transaction_type: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Time")]
    transaction_time: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction_id: transaction.transaction_id,
            account_id: transaction.account_id,
            transaction_type: transaction.transaction_type.clone(),
            amount: format!("${:.2}", transaction.amount),
            transaction_time: transaction
                .transaction_time
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            details: transaction.details.clone().unwrap_or_default(),
        }
    }
}

fn render(workflow: &FundsWorkflow, format: OutputFormat) -> Result<String> {
    let accounts = workflow.accounts();
    let rows: Vec<AccountRow> = accounts.iter().map(AccountRow::from).collect();
    Ok(render_rows(rows, accounts, format, "You have no accounts yet.")?)
}

fn fail_on(notice: Notice) -> Result<()> {
    if notice.is_error() {
        Err(anyhow!("{}", notice.message))
    } else {
        print_notice(&notice);
        Ok(())
    }
}

/// # Errors
/// Returns load failures, invalid amounts and rejected requests.
pub async fn run(api: &ApiClient, command: AccountsCommand, format: OutputFormat) -> Result<()> {
    let mut workflow = FundsWorkflow::new();
    match command {
        AccountsCommand::List => workflow.load(api).await,
        AccountsCommand::Create => fail_on(workflow.create_account(api).await)?,
        AccountsCommand::Move {
            account_id,
            kind,
            amount,
        } => {
            workflow.open_dialog(account_id, kind);
            workflow.set_amount(amount);
            fail_on(workflow.confirm(api).await)?;
        }
    }

    if let Some(err) = workflow.state().failure() {
        return Err(request_error(err));
    }
    println!("{}", render(&workflow, format)?);
    Ok(())
}

/// # Errors
/// Returns the request failure.
pub async fn transactions(api: &ApiClient, format: OutputFormat) -> Result<()> {
    let state = Loadable::from_result(client::list_transactions(api).await);
    if let Some(err) = state.failure() {
        return Err(request_error(err));
    }
    let transactions = state.value().map_or(&[][..], Vec::as_slice);
    let rows: Vec<TransactionRow> = transactions.iter().map(TransactionRow::from).collect();
    println!(
        "{}",
        render_rows(rows, transactions, format, "No transactions yet.")?
    );
    Ok(())
}

/// # Errors
/// Returns invalid input or the rejected transfer.
pub async fn transfer(api: &ApiClient, args: TransferArgs) -> Result<()> {
    let mut form = TransferForm::new();
    form.set_field(TransferField::Source, args.source);
    form.set_field(TransferField::Destination, args.destination);
    form.set_field(TransferField::Amount, args.amount);
    fail_on(form.submit(api).await)
}
