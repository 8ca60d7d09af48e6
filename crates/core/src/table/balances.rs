//! Two-dimensional dumps of balance containers.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use ledgerlens_shared::types::{Amount, Periodicity};

use super::cell::{Cell, DataTable, into_matrix, transpose};
use crate::book::Book;
use crate::reports::BalancesContainer;

/// Which figures a balances table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BalanceType {
    /// One row per container with its cumulative balance.
    #[default]
    Total,
    /// One row per date, one column per container, with period balances.
    Period,
    /// One row per date, one column per container, with cumulative balances.
    Cumulative,
    /// One row per container with cumulative debit and credit.
    Trial,
}

/// Builds a header plus rows from balance containers.
pub struct BalancesDataTableBuilder<'a> {
    book: &'a dyn Book,
    periodicity: Periodicity,
    containers: Vec<&'a BalancesContainer>,
    balance_type: BalanceType,
    format_values: bool,
    format_dates: bool,
    raw: bool,
    expand_groups: bool,
    transposed: bool,
    hide_names: bool,
}

impl<'a> BalancesDataTableBuilder<'a> {
    /// Creates a builder over `containers`, in order.
    #[must_use]
    pub fn new(
        book: &'a dyn Book,
        periodicity: Periodicity,
        containers: Vec<&'a BalancesContainer>,
    ) -> Self {
        Self {
            book,
            periodicity,
            containers,
            balance_type: BalanceType::Total,
            format_values: false,
            format_dates: false,
            raw: false,
            expand_groups: false,
            transposed: false,
            hide_names: false,
        }
    }

    /// Selects the figures to show.
    #[must_use]
    pub fn balance_type(mut self, balance_type: BalanceType) -> Self {
        self.balance_type = balance_type;
        self
    }

    /// Renders amounts as book text instead of raw amounts.
    #[must_use]
    pub fn format_values(mut self) -> Self {
        self.format_values = true;
        self
    }

    /// Renders dates as book text instead of raw dates.
    #[must_use]
    pub fn format_dates(mut self) -> Self {
        self.format_dates = true;
        self
    }

    /// Uses stored balances without credit-nature sign normalization.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// Follows each group with all of its descendants.
    #[must_use]
    pub fn expand_groups(mut self) -> Self {
        self.expand_groups = true;
        self
    }

    /// Swaps rows and columns of the result.
    #[must_use]
    pub fn transposed(mut self) -> Self {
        self.transposed = true;
        self
    }

    /// Leaves out the header row.
    #[must_use]
    pub fn hide_names(mut self) -> Self {
        self.hide_names = true;
        self
    }

    /// Returns the table.
    ///
    /// Without data rows the result is the header alone, or empty when names
    /// are hidden.
    #[must_use]
    pub fn build(&self) -> DataTable {
        let containers = self.flattened();
        let (header, rows) = match self.balance_type {
            BalanceType::Total => self.total_rows(&containers),
            BalanceType::Trial => self.trial_rows(&containers),
            BalanceType::Period | BalanceType::Cumulative => self.time_rows(&containers),
        };

        tracing::trace!(
            balance_type = ?self.balance_type,
            containers = containers.len(),
            rows = rows.len(),
            "built balances table"
        );

        let mut table = Vec::with_capacity(rows.len() + 1);
        if !self.hide_names {
            table.push(header);
        }
        if rows.is_empty() {
            return table;
        }
        table.extend(rows);
        let table = into_matrix(table);
        if self.transposed {
            transpose(table)
        } else {
            table
        }
    }

    fn flattened(&self) -> Vec<&'a BalancesContainer> {
        let mut flattened = Vec::with_capacity(self.containers.len());
        for &container in &self.containers {
            if self.expand_groups {
                push_expanded(container, &mut flattened);
            } else {
                flattened.push(container);
            }
        }
        flattened
    }

    fn total_rows(&self, containers: &[&BalancesContainer]) -> (Vec<Cell>, DataTable) {
        let header = vec![Cell::from("Name"), Cell::from("Balance")];
        let rows = containers
            .iter()
            .map(|container| {
                let balance = if self.raw {
                    container.cumulative_balance_raw()
                } else {
                    container.cumulative_balance()
                };
                vec![Cell::from(container.name()), self.value_cell(balance)]
            })
            .collect();
        (header, rows)
    }

    fn trial_rows(&self, containers: &[&BalancesContainer]) -> (Vec<Cell>, DataTable) {
        let header = vec![Cell::from("Name"), Cell::from("Debit"), Cell::from("Credit")];
        let rows = containers
            .iter()
            .map(|container| {
                vec![
                    Cell::from(container.name()),
                    self.value_cell(container.cumulative_debit()),
                    self.value_cell(container.cumulative_credit()),
                ]
            })
            .collect();
        (header, rows)
    }

    fn time_rows(&self, containers: &[&BalancesContainer]) -> (Vec<Cell>, DataTable) {
        let mut header = Vec::with_capacity(containers.len() + 1);
        header.push(Cell::from("Date"));
        header.extend(containers.iter().map(|container| Cell::from(container.name())));

        let mut by_date: BTreeMap<u32, (NaiveDate, Vec<Cell>)> = BTreeMap::new();
        for (column, container) in containers.iter().enumerate() {
            for balance in container.balances() {
                let value = match (self.balance_type, self.raw) {
                    (BalanceType::Period, false) => balance.period_balance(),
                    (BalanceType::Period, true) => balance.period_balance_raw(),
                    (_, false) => balance.cumulative_balance(),
                    (_, true) => balance.cumulative_balance_raw(),
                };
                let (_, cells) = by_date
                    .entry(balance.fuzzy_date())
                    .or_insert_with(|| (balance.date(), vec![Cell::Blank; containers.len()]));
                cells[column] = self.value_cell(value);
            }
        }

        let rows = by_date
            .into_values()
            .map(|(date, cells)| {
                let mut row = Vec::with_capacity(cells.len() + 1);
                row.push(self.date_cell(date));
                row.extend(cells);
                row
            })
            .collect();
        (header, rows)
    }

    fn value_cell(&self, amount: Amount) -> Cell {
        if self.format_values {
            Cell::Text(self.book.format_value(amount))
        } else {
            Cell::Amount(amount)
        }
    }

    fn date_cell(&self, date: NaiveDate) -> Cell {
        if !self.format_dates {
            return Cell::Date(date);
        }
        match self.periodicity.label_pattern() {
            Some(pattern) => Cell::Text(date.format(pattern).to_string()),
            None => Cell::Text(self.book.format_date(date)),
        }
    }
}

impl fmt::Debug for BalancesDataTableBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancesDataTableBuilder")
            .field("periodicity", &self.periodicity)
            .field("containers", &self.containers)
            .field("balance_type", &self.balance_type)
            .field("raw", &self.raw)
            .field("expand_groups", &self.expand_groups)
            .finish_non_exhaustive()
    }
}

fn push_expanded<'a>(container: &'a BalancesContainer, out: &mut Vec<&'a BalancesContainer>) {
    out.push(container);
    for child in container.balances_containers() {
        push_expanded(child, out);
    }
}
