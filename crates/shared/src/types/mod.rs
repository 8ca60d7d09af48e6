//! Common types used across the workspace.

pub mod amount;
pub mod book;

pub use amount::{Amount, AmountParseError, RoundingMode};
pub use book::{DecimalSeparator, Periodicity};
