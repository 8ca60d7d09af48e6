//! Command execution: file I/O and JSON decoding around the core builders.

use std::path::Path;
use std::sync::Arc;

use ledgerlens_core::Book;
use ledgerlens_core::reports::{BalancesReport, ReportPayload};
use ledgerlens_core::table::{AccountRef, DataTable, TransactionsDataTableBuilder, TransactionsPayload};
use ledgerlens_shared::{AppError, AppResult, BookSettings};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::cli::{BalancesArgs, TransactionsArgs};

/// Builds the balances table described by `args`.
pub fn balances(args: &BalancesArgs, settings: &BookSettings) -> AppResult<DataTable> {
    let payload: ReportPayload = read_json(&args.path)?;
    let book: Arc<dyn Book> = Arc::new(settings.clone());
    let report = BalancesReport::from_payload(book, payload)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    info!(
        path = %args.path.display(),
        containers = report.balances_containers().len(),
        periodicity = %report.periodicity(),
        "Loaded balances report"
    );

    let mut builder = match &args.container {
        Some(name) => report
            .balances_container(name)
            .ok_or_else(|| AppError::NotFound(format!("Container {name}")))?
            .create_data_table(),
        None => report.create_data_table(),
    }
    .balance_type(args.balance_type.into());

    if args.expand_groups {
        builder = builder.expand_groups();
    }
    if args.raw {
        builder = builder.raw();
    }
    if args.transposed {
        builder = builder.transposed();
    }
    if args.hide_names {
        builder = builder.hide_names();
    }
    if args.table.format_values {
        builder = builder.format_values();
    }
    if args.table.format_dates {
        builder = builder.format_dates();
    }
    Ok(builder.build())
}

/// Builds the transactions table described by `args`.
pub fn transactions(args: &TransactionsArgs, settings: &BookSettings) -> AppResult<DataTable> {
    let payload: TransactionsPayload = read_json(&args.path)?;
    info!(
        path = %args.path.display(),
        transactions = payload.items.len(),
        "Loaded transactions"
    );

    let account = match &args.account {
        Some(id) => Some(
            find_account(&payload, id)
                .ok_or_else(|| AppError::NotFound(format!("Account {id}")))?,
        ),
        None => payload.filtered_by_account.clone(),
    };

    let mut builder = TransactionsDataTableBuilder::new(settings, payload.items);
    if let Some(account) = account {
        builder = builder.filtered_by_account(account);
    }
    if args.add_urls {
        builder = builder.add_urls();
    }
    if args.table.format_values {
        builder = builder.format_values();
    }
    if args.table.format_dates {
        builder = builder.format_dates();
    }
    Ok(builder.build())
}

fn find_account(payload: &TransactionsPayload, id: &str) -> Option<AccountRef> {
    payload
        .filtered_by_account
        .iter()
        .chain(payload.items.iter().flat_map(|transaction| {
            transaction
                .credit_account
                .iter()
                .chain(transaction.debit_account.iter())
        }))
        .find(|account| account.id == id)
        .cloned()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text).map_err(|e| AppError::Parse(format!("{}: {e}", path.display())))
}
