//! Core balance reporting logic for Ledgerlens.
//!
//! This crate contains pure reporting logic with ZERO file, network or JSON
//! dependencies. Snapshots arrive already aggregated; this crate wraps them,
//! normalizes and formats their figures, and lays them out as tables.
//!
//! # Modules
//!
//! - `book` - Book formatting context consumed by reports and tables
//! - `reports` - Balance reports, account and group containers
//! - `table` - Two-dimensional output of balances and transactions

pub mod book;
pub mod reports;
pub mod table;

pub use book::Book;
pub use reports::{Balance, BalancesContainer, BalancesReport, ReportError};
pub use table::{BalanceType, BalancesDataTableBuilder, Cell, DataTable, TransactionsDataTableBuilder};
