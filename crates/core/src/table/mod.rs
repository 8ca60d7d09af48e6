//! Tabular output for spreadsheets and reports.
//!
//! - Balance container tables (totals, trial balance, time series)
//! - Transaction tables, plain or as an account extract

pub mod balances;
pub mod cell;
pub mod transactions;


pub use balances::{BalanceType, BalancesDataTableBuilder};
pub use cell::{Cell, DataTable};
pub use transactions::{AccountRef, Transaction, TransactionsDataTableBuilder, TransactionsPayload};
