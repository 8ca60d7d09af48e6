//! Report error types.

use thiserror::Error;

/// Snapshot contract violations found while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A container snapshot has no name.
    #[error("Balance snapshot is missing its name")]
    MissingName,

    /// A container snapshot does not state its credit nature.
    #[error("Balance snapshot for {name} is missing its credit nature")]
    MissingCreditNature {
        /// Container name.
        name: String,
    },

    /// A dated balance does not form a calendar date.
    #[error("Invalid balance date in {name}: {fuzzy_date:?}")]
    InvalidBalanceDate {
        /// Owning container name.
        name: String,
        /// The offending `YYYYMMDD` value, if one could be assembled.
        fuzzy_date: Option<u32>,
    },
}
