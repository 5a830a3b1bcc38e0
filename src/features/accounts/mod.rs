//! Customer accounts: the account list with deposit and withdraw dialogs,
//! the transfer form, and the read-only transaction history.

pub mod client;
mod funds;
mod transfer;
pub mod types;

pub use funds::{AmountDialog, FundsWorkflow, parse_amount};
pub use transfer::{TransferField, TransferForm};
pub use types::{Account, MovementKind, Transaction};
