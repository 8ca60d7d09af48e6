//! Balance reports.
//!
//! This module turns already aggregated balance snapshots into a tree of
//! containers:
//! - Wire payloads and their validation into typed snapshots
//! - Account and group containers with rounded, sign-normalized figures
//! - Dated balances bound to their container
//! - The report root holding book context

pub mod balance;
pub mod container;
pub mod error;
mod figures;
pub mod report;
pub mod snapshot;
pub mod wire;

#[cfg(test)]
mod tests;

pub use balance::Balance;
pub use container::BalancesContainer;
pub use error::ReportError;
pub use figures::representative_value;
pub use report::BalancesReport;
pub use snapshot::{
    AccountSnapshot, BalanceFigures, BalanceSnapshot, ContainerSnapshot, GroupSnapshot,
};
pub use wire::{
    AccountBalancesPayload, BalancePayload, FiguresPayload, GroupBalancesPayload, ReportPayload,
};
