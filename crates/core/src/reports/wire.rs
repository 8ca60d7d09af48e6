//! Balance report payloads as they arrive on the wire.
//!
//! Every field is optional here; [`super::snapshot`] validates and converts
//! these into strongly typed snapshots.

use ledgerlens_shared::types::{Amount, Periodicity};
use serde::Deserialize;

/// Top-level balances report payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    /// Periodicity the balances were bucketed with.
    pub periodicity: Option<Periodicity>,
    /// Top-level account balances.
    pub account_balances: Option<Vec<AccountBalancesPayload>>,
    /// Top-level group balances.
    pub group_balances: Option<Vec<GroupBalancesPayload>>,
}

/// Aggregated figures shared by accounts, groups and dated balances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiguresPayload {
    /// Cumulative balance up to the report date.
    pub cumulative_balance: Option<Amount>,
    /// Cumulative credit up to the report date.
    pub cumulative_credit: Option<Amount>,
    /// Cumulative debit up to the report date.
    pub cumulative_debit: Option<Amount>,
    /// Balance within the period.
    pub period_balance: Option<Amount>,
    /// Credit within the period.
    pub period_credit: Option<Amount>,
    /// Debit within the period.
    pub period_debit: Option<Amount>,
}

/// Balances of a single account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalancesPayload {
    /// Account name.
    pub name: Option<String>,
    /// Credit nature of the account.
    pub credit: Option<bool>,
    /// Whether the account is permanent (balance sheet).
    pub permanent: Option<bool>,
    /// Aggregated figures.
    #[serde(flatten)]
    pub figures: FiguresPayload,
    /// Dated balances.
    pub balances: Option<Vec<BalancePayload>>,
}

/// Balances of a group, with nested children.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalancesPayload {
    /// Group name.
    pub name: Option<String>,
    /// Credit nature, `false` when descendants are mixed.
    pub credit: Option<bool>,
    /// Aggregated figures.
    #[serde(flatten)]
    pub figures: FiguresPayload,
    /// Dated balances.
    pub balances: Option<Vec<BalancePayload>>,
    /// Child account balances.
    pub account_balances: Option<Vec<AccountBalancesPayload>>,
    /// Child group balances.
    pub group_balances: Option<Vec<GroupBalancesPayload>>,
}

/// A dated balance entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePayload {
    /// Day of month, absent or zero for monthly and yearly buckets.
    pub day: Option<u32>,
    /// Month of year, absent or zero for yearly buckets.
    pub month: Option<u32>,
    /// Year.
    pub year: Option<i32>,
    /// `YYYYMMDD` with zeroed unused parts.
    pub fuzzy_date: Option<u32>,
    /// Aggregated figures.
    #[serde(flatten)]
    pub figures: FiguresPayload,
}
