//! Shared types, errors, and configuration for Ledgerlens.
//!
//! This crate provides common types used across all other crates:
//! - Exact decimal amounts with explicit non-finite states
//! - Book formatting primitives (decimal separator, periodicity)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, BookSettings, OutputFormat};
pub use error::{AppError, AppResult};
