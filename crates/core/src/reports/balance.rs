//! Dated balances within a container.

use chrono::NaiveDate;
use ledgerlens_shared::types::Amount;

use super::container::BalancesContainer;
use super::figures::{FigureSource, ReportContext, figure_accessors};
use super::snapshot::{BalanceFigures, BalanceSnapshot};

/// One dated balance of a [`BalancesContainer`].
///
/// Borrows its container to apply the same rounding, credit nature and
/// formatting rules.
#[derive(Debug, Clone, Copy)]
pub struct Balance<'a> {
    container: &'a BalancesContainer,
    snapshot: &'a BalanceSnapshot,
}

impl<'a> Balance<'a> {
    pub(crate) fn new(container: &'a BalancesContainer, snapshot: &'a BalanceSnapshot) -> Self {
        Self {
            container,
            snapshot,
        }
    }

    /// The container this balance belongs to.
    #[must_use]
    pub fn container(&self) -> &'a BalancesContainer {
        self.container
    }

    /// `YYYYMMDD`, with zeroed day and month for coarser periodicities.
    #[must_use]
    pub fn fuzzy_date(&self) -> u32 {
        self.snapshot.fuzzy_date
    }

    /// Calendar date of the bucket.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.snapshot.date
    }

    /// Year of the bucket.
    #[must_use]
    pub fn year(&self) -> u32 {
        self.snapshot.year()
    }

    /// Month of the bucket, if bucketed at least monthly.
    #[must_use]
    pub fn month(&self) -> Option<u32> {
        self.snapshot.month()
    }

    /// Day of the bucket, if bucketed daily.
    #[must_use]
    pub fn day(&self) -> Option<u32> {
        self.snapshot.day()
    }

    figure_accessors!();
}

impl FigureSource for Balance<'_> {
    fn context(&self) -> &ReportContext {
        self.container.context()
    }

    fn figures(&self) -> &BalanceFigures {
        &self.snapshot.figures
    }

    fn credit_nature(&self) -> bool {
        self.container.is_credit()
    }
}
