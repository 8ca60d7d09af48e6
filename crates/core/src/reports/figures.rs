//! Rounding, sign normalization and formatting shared by containers and
//! dated balances.

use std::sync::Arc;

use ledgerlens_shared::types::{Amount, Periodicity, RoundingMode};

use super::snapshot::BalanceFigures;
use crate::book::Book;

/// Book context shared by every container of a report.
pub(crate) struct ReportContext {
    pub(crate) book: Arc<dyn Book>,
    pub(crate) periodicity: Periodicity,
}

impl ReportContext {
    fn rounded(&self, value: Amount) -> Amount {
        value.round(self.book.fraction_digits(), RoundingMode::HalfUp)
    }
}

/// Flips the sign of debit-natured values so that positive always reads in
/// the natural direction of the container.
#[must_use]
pub fn representative_value(value: Amount, credit: bool) -> Amount {
    if credit { value } else { -value }
}

/// Anything exposing aggregated figures under a report context.
pub(crate) trait FigureSource {
    fn context(&self) -> &ReportContext;
    fn figures(&self) -> &BalanceFigures;
    fn credit_nature(&self) -> bool;

    fn rounded_figure(&self, pick: impl FnOnce(&BalanceFigures) -> Amount) -> Amount {
        self.context().rounded(pick(self.figures()))
    }

    fn normalized_figure(&self, pick: impl FnOnce(&BalanceFigures) -> Amount) -> Amount {
        representative_value(self.rounded_figure(pick), self.credit_nature())
    }

    fn format_figure(&self, value: Amount) -> String {
        self.context().book.format_value(value)
    }
}

/// Expands the numeric accessors and their `_text` counterparts for a
/// [`FigureSource`] implementor.
macro_rules! figure_accessors {
    () => {
        figure_accessors! {
            /// Cumulative balance, rounded and sign-normalized to the credit nature.
            cumulative_balance, cumulative_balance_text => cumulative_balance, normalized_figure;
            /// Cumulative balance, rounded, as stored.
            cumulative_balance_raw, cumulative_balance_raw_text => cumulative_balance, rounded_figure;
            /// Cumulative credit, rounded.
            cumulative_credit, cumulative_credit_text => cumulative_credit, rounded_figure;
            /// Cumulative debit, rounded.
            cumulative_debit, cumulative_debit_text => cumulative_debit, rounded_figure;
            /// Period balance, rounded and sign-normalized to the credit nature.
            period_balance, period_balance_text => period_balance, normalized_figure;
            /// Period balance, rounded, as stored.
            period_balance_raw, period_balance_raw_text => period_balance, rounded_figure;
            /// Period credit, rounded.
            period_credit, period_credit_text => period_credit, rounded_figure;
            /// Period debit, rounded.
            period_debit, period_debit_text => period_debit, rounded_figure;
        }
    };
    ($( $(#[$doc:meta])* $name:ident, $text:ident => $field:ident, $method:ident; )*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(&self) -> Amount {
                self.$method(|figures| figures.$field)
            }

            #[doc = concat!("[`Self::", stringify!($name), "`] formatted by the book.")]
            #[must_use]
            pub fn $text(&self) -> String {
                self.format_figure(self.$name())
            }
        )*
    };
}

pub(crate) use figure_accessors;
