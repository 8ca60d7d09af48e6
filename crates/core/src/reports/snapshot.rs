//! Validated, strongly typed balance snapshots.

use std::sync::Arc;

use chrono::NaiveDate;
use ledgerlens_shared::types::Amount;

use super::error::ReportError;
use super::wire::{
    AccountBalancesPayload, BalancePayload, FiguresPayload, GroupBalancesPayload,
};

/// The six aggregated figures every balance carries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceFigures {
    /// Cumulative balance up to the report date.
    pub cumulative_balance: Amount,
    /// Cumulative credit up to the report date.
    pub cumulative_credit: Amount,
    /// Cumulative debit up to the report date.
    pub cumulative_debit: Amount,
    /// Balance within the period.
    pub period_balance: Amount,
    /// Credit within the period.
    pub period_credit: Amount,
    /// Debit within the period.
    pub period_debit: Amount,
}

impl From<FiguresPayload> for BalanceFigures {
    fn from(payload: FiguresPayload) -> Self {
        Self {
            cumulative_balance: payload.cumulative_balance.unwrap_or_default(),
            cumulative_credit: payload.cumulative_credit.unwrap_or_default(),
            cumulative_debit: payload.cumulative_debit.unwrap_or_default(),
            period_balance: payload.period_balance.unwrap_or_default(),
            period_credit: payload.period_credit.unwrap_or_default(),
            period_debit: payload.period_debit.unwrap_or_default(),
        }
    }
}

/// One dated balance.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    /// `YYYYMMDD`, with zeroed day and month for coarser periodicities.
    pub fuzzy_date: u32,
    /// Calendar date of the bucket, missing parts set to 1.
    pub date: NaiveDate,
    /// Aggregated figures for the bucket.
    pub figures: BalanceFigures,
}

impl BalanceSnapshot {
    /// Creates a dated balance from a `YYYYMMDD` fuzzy date.
    ///
    /// Returns `None` when the fuzzy date is not a valid calendar date.
    #[must_use]
    pub fn new(fuzzy_date: u32, figures: BalanceFigures) -> Option<Self> {
        let date = date_from_fuzzy(fuzzy_date)?;
        Some(Self {
            fuzzy_date,
            date,
            figures,
        })
    }

    /// Year part of the fuzzy date.
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.fuzzy_date / 10_000
    }

    /// Month part of the fuzzy date, `None` for yearly buckets.
    #[must_use]
    pub const fn month(&self) -> Option<u32> {
        non_zero(self.fuzzy_date / 100 % 100)
    }

    /// Day part of the fuzzy date, `None` for monthly and yearly buckets.
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        non_zero(self.fuzzy_date % 100)
    }
}

const fn non_zero(value: u32) -> Option<u32> {
    if value == 0 { None } else { Some(value) }
}

fn date_from_fuzzy(fuzzy_date: u32) -> Option<NaiveDate> {
    let year = i32::try_from(fuzzy_date / 10_000).ok()?;
    let month = (fuzzy_date / 100 % 100).max(1);
    let day = (fuzzy_date % 100).max(1);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Balances of a single account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    /// Account name.
    pub name: String,
    /// Credit nature.
    pub credit: bool,
    /// Permanent (balance sheet) account.
    pub permanent: bool,
    /// Aggregated figures.
    pub figures: BalanceFigures,
    /// Dated balances, oldest first.
    pub balances: Vec<BalanceSnapshot>,
}

/// Balances of a group and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSnapshot {
    /// Group name.
    pub name: String,
    /// Credit nature as supplied upstream; `false` for mixed descendants.
    pub credit: bool,
    /// Aggregated figures.
    pub figures: BalanceFigures,
    /// Dated balances, oldest first.
    pub balances: Vec<BalanceSnapshot>,
    /// Child groups.
    pub groups: Vec<Arc<GroupSnapshot>>,
    /// Child accounts.
    pub accounts: Vec<Arc<AccountSnapshot>>,
}

/// Either kind of top-level snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerSnapshot {
    /// An account leaf.
    Account(Arc<AccountSnapshot>),
    /// A group branch.
    Group(Arc<GroupSnapshot>),
}

impl From<AccountSnapshot> for ContainerSnapshot {
    fn from(snapshot: AccountSnapshot) -> Self {
        Self::Account(Arc::new(snapshot))
    }
}

impl From<GroupSnapshot> for ContainerSnapshot {
    fn from(snapshot: GroupSnapshot) -> Self {
        Self::Group(Arc::new(snapshot))
    }
}

fn required_name(name: Option<String>) -> Result<String, ReportError> {
    name.ok_or(ReportError::MissingName)
}

fn required_credit(credit: Option<bool>, name: &str) -> Result<bool, ReportError> {
    credit.ok_or_else(|| ReportError::MissingCreditNature {
        name: name.to_string(),
    })
}

fn convert_balances(
    balances: Option<Vec<BalancePayload>>,
    name: &str,
) -> Result<Vec<BalanceSnapshot>, ReportError> {
    balances
        .unwrap_or_default()
        .into_iter()
        .map(|payload| convert_balance(payload, name))
        .collect()
}

fn convert_balance(payload: BalancePayload, name: &str) -> Result<BalanceSnapshot, ReportError> {
    let fuzzy_date = match payload.year {
        Some(year) => {
            let month = payload.month.unwrap_or(0).min(99);
            let day = payload.day.unwrap_or(0).min(99);
            u32::try_from(year)
                .ok()
                .and_then(|year| year.checked_mul(10_000))
                .and_then(|base| base.checked_add(month * 100 + day))
        }
        None => payload.fuzzy_date,
    };
    fuzzy_date
        .and_then(|fuzzy| BalanceSnapshot::new(fuzzy, payload.figures.into()))
        .ok_or_else(|| ReportError::InvalidBalanceDate {
            name: name.to_string(),
            fuzzy_date,
        })
}

impl TryFrom<AccountBalancesPayload> for AccountSnapshot {
    type Error = ReportError;

    fn try_from(payload: AccountBalancesPayload) -> Result<Self, Self::Error> {
        let name = required_name(payload.name)?;
        let credit = required_credit(payload.credit, &name)?;
        let balances = convert_balances(payload.balances, &name)?;
        Ok(Self {
            credit,
            permanent: payload.permanent.unwrap_or(false),
            figures: payload.figures.into(),
            balances,
            name,
        })
    }
}

impl TryFrom<GroupBalancesPayload> for GroupSnapshot {
    type Error = ReportError;

    fn try_from(payload: GroupBalancesPayload) -> Result<Self, Self::Error> {
        let name = required_name(payload.name)?;
        let credit = required_credit(payload.credit, &name)?;
        let balances = convert_balances(payload.balances, &name)?;
        let groups = payload
            .group_balances
            .unwrap_or_default()
            .into_iter()
            .map(|child| Self::try_from(child).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        let accounts = payload
            .account_balances
            .unwrap_or_default()
            .into_iter()
            .map(|child| AccountSnapshot::try_from(child).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            credit,
            figures: payload.figures.into(),
            balances,
            groups,
            accounts,
            name,
        })
    }
}
