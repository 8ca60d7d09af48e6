//! The book a report belongs to, seen only through its formatting rules.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerlens_shared::BookSettings;
use ledgerlens_shared::types::{Amount, DecimalSeparator, Periodicity};

/// Read-only formatting context supplied by the book.
///
/// Reports and table builders never load book configuration themselves; they
/// consult an implementation of this trait.
pub trait Book: Send + Sync {
    /// Number of fraction digits amounts are rounded to.
    fn fraction_digits(&self) -> u32;

    /// Decimal separator for amount text.
    fn decimal_separator(&self) -> DecimalSeparator;

    /// Formats a date for display.
    fn format_date(&self, date: NaiveDate) -> String;

    /// Periodicity used when a report payload does not state one.
    fn periodicity(&self) -> Periodicity {
        Periodicity::default()
    }

    /// Formats an amount with the book's separator and fraction digits.
    ///
    /// Infinities render as `∞` / `-∞` and `NaN` as an empty string.
    fn format_value(&self, value: Amount) -> String {
        if !value.is_finite() {
            tracing::warn!(%value, "formatting non-finite amount");
        }
        self.decimal_separator()
            .format(value, self.fraction_digits())
    }

    /// Formats a recording timestamp for display.
    fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        self.format_date(timestamp.date_naive())
    }
}

impl Book for BookSettings {
    fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    fn decimal_separator(&self) -> DecimalSeparator {
        self.decimal_separator
    }

    fn format_date(&self, date: NaiveDate) -> String {
        BookSettings::format_date(self, date)
    }

    fn periodicity(&self) -> Periodicity {
        self.periodicity
    }
}
