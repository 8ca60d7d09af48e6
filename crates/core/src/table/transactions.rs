//! Two-dimensional dumps of transaction streams.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerlens_shared::types::Amount;
use serde::Deserialize;

use super::cell::{Cell, DataTable, into_matrix};
use crate::book::Book;

/// Reference to an account on one side of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    /// Account id.
    pub id: String,
    /// Account name.
    pub name: String,
    /// Permanent (balance sheet) account.
    #[serde(default)]
    pub permanent: bool,
}

/// A posted transaction as delivered by the transaction source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id.
    #[serde(default)]
    pub id: Option<String>,
    /// Account credited (the origin).
    #[serde(default)]
    pub credit_account: Option<AccountRef>,
    /// Account debited (the destination).
    #[serde(default)]
    pub debit_account: Option<AccountRef>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount moved.
    #[serde(default)]
    pub amount: Option<Amount>,
    /// Date the transaction refers to.
    pub informed_date: NaiveDate,
    /// When the transaction was recorded.
    pub post_date: DateTime<Utc>,
    /// Attachment links.
    #[serde(default)]
    pub urls: Vec<String>,
    /// Running balance of the filtered account after this transaction.
    #[serde(default)]
    pub account_balance: Option<Amount>,
}

impl Transaction {
    /// Whether `account` is the credit side of this transaction.
    #[must_use]
    pub fn is_credit_on(&self, account: &AccountRef) -> bool {
        self.credit_account
            .as_ref()
            .is_some_and(|credit| credit.id == account.id)
    }
}

/// A transaction listing, optionally filtered by one account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPayload {
    /// The account the listing is filtered by, if any.
    #[serde(default)]
    pub filtered_by_account: Option<AccountRef>,
    /// Transactions in listing order.
    #[serde(default)]
    pub items: Vec<Transaction>,
}

/// Builds a header plus one row per transaction.
///
/// Without an account filter, rows list origin and destination accounts and
/// the amount. Filtered by an account, rows become an extract of that
/// account: the counterpart account, the amount in the Debit or Credit
/// column depending on which side the account is on and, for permanent
/// accounts, the running balance.
///
/// The transaction sequence is consumed once, in order.
pub struct TransactionsDataTableBuilder<'b, I> {
    transactions: I,
    account: Option<AccountRef>,
    rows: RowWriter<'b>,
}

struct RowWriter<'b> {
    book: &'b dyn Book,
    format_dates: bool,
    format_values: bool,
    add_urls: bool,
}

impl<'b, I> TransactionsDataTableBuilder<'b, I>
where
    I: Iterator<Item = Transaction>,
{
    /// Creates a builder over a forward-only transaction sequence.
    pub fn new<T>(book: &'b dyn Book, transactions: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            transactions: transactions.into_iter(),
            account: None,
            rows: RowWriter {
                book,
                format_dates: false,
                format_values: false,
                add_urls: false,
            },
        }
    }

    /// Builds an extract relative to `account`.
    #[must_use]
    pub fn filtered_by_account(mut self, account: AccountRef) -> Self {
        self.account = Some(account);
        self
    }

    /// Renders dates as book text instead of raw dates.
    #[must_use]
    pub fn format_dates(mut self) -> Self {
        self.rows.format_dates = true;
        self
    }

    /// Renders amounts as book text instead of raw amounts.
    #[must_use]
    pub fn format_values(mut self) -> Self {
        self.rows.format_values = true;
        self
    }

    /// Appends one column per attachment URL.
    #[must_use]
    pub fn add_urls(mut self) -> Self {
        self.rows.add_urls = true;
        self
    }

    /// Consumes the transactions and returns the table.
    ///
    /// An empty sequence yields just the header row.
    #[must_use]
    pub fn build(self) -> DataTable {
        let Self {
            transactions,
            account,
            rows: writer,
        } = self;
        let header = writer.header(account.as_ref());

        let mut rows: DataTable = transactions
            .map(|transaction| match &account {
                Some(account) => writer.extract_row(&transaction, account),
                None => writer.row(&transaction),
            })
            .collect();

        tracing::trace!(
            rows = rows.len(),
            extract = account.is_some(),
            "built transactions table"
        );

        if rows.is_empty() {
            return vec![header];
        }
        rows.insert(0, header);
        into_matrix(rows)
    }
}

impl RowWriter<'_> {
    fn header(&self, account: Option<&AccountRef>) -> Vec<Cell> {
        let mut columns = match account {
            Some(account) => {
                let mut columns = vec!["Date", "Account", "Description", "Debit", "Credit"];
                if account.permanent {
                    columns.push("Balance");
                }
                columns.push("Recorded at");
                columns
            }
            None => vec![
                "Date",
                "Origin",
                "Destination",
                "Description",
                "Amount",
                "Recorded at",
            ],
        };
        if self.add_urls {
            columns.push("Attachment");
        }
        columns.into_iter().map(Cell::from).collect()
    }

    fn row(&self, transaction: &Transaction) -> Vec<Cell> {
        let mut row = vec![
            self.date_cell(transaction.informed_date),
            account_name(transaction.credit_account.as_ref()),
            account_name(transaction.debit_account.as_ref()),
            description(transaction),
            transaction
                .amount
                .map_or(Cell::Blank, |amount| self.value_cell(amount)),
            self.timestamp_cell(transaction.post_date),
        ];
        self.push_urls(&mut row, transaction);
        row
    }

    fn extract_row(&self, transaction: &Transaction, account: &AccountRef) -> Vec<Cell> {
        let credit_side = transaction.is_credit_on(account);

        let counterpart = match (&transaction.credit_account, &transaction.debit_account) {
            (Some(credit), Some(debit)) => {
                let other = if credit_side { debit } else { credit };
                Cell::from(other.name.as_str())
            }
            _ => Cell::Blank,
        };

        let mut row = vec![
            self.date_cell(transaction.informed_date),
            counterpart,
            description(transaction),
        ];

        match transaction.amount {
            Some(amount) if credit_side => row.extend([Cell::Blank, self.value_cell(amount)]),
            Some(amount) => row.extend([self.value_cell(amount), Cell::Blank]),
            None => row.extend([Cell::Blank, Cell::Blank]),
        }

        if account.permanent {
            row.push(
                transaction
                    .account_balance
                    .map_or(Cell::Blank, |balance| self.value_cell(balance)),
            );
        }

        row.push(self.timestamp_cell(transaction.post_date));
        self.push_urls(&mut row, transaction);
        row
    }

    fn push_urls(&self, row: &mut Vec<Cell>, transaction: &Transaction) {
        if !self.add_urls {
            return;
        }
        if transaction.urls.is_empty() {
            row.push(Cell::Blank);
        } else {
            row.extend(transaction.urls.iter().map(|url| Cell::from(url.as_str())));
        }
    }

    fn value_cell(&self, amount: Amount) -> Cell {
        if self.format_values {
            Cell::Text(self.book.format_value(amount))
        } else {
            Cell::Amount(amount)
        }
    }

    fn date_cell(&self, date: NaiveDate) -> Cell {
        if self.format_dates {
            Cell::Text(self.book.format_date(date))
        } else {
            Cell::Date(date)
        }
    }

    fn timestamp_cell(&self, timestamp: DateTime<Utc>) -> Cell {
        if self.format_dates {
            Cell::Text(self.book.format_timestamp(timestamp))
        } else {
            Cell::Timestamp(timestamp)
        }
    }
}

fn account_name(account: Option<&AccountRef>) -> Cell {
    account.map_or(Cell::Blank, |account| Cell::from(account.name.as_str()))
}

fn description(transaction: &Transaction) -> Cell {
    transaction
        .description
        .as_deref()
        .map_or(Cell::Blank, Cell::from)
}
