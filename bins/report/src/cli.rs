//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ledgerlens_core::table::BalanceType;
use ledgerlens_shared::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlens",
    version,
    about = "Balance and transaction tables from book snapshots",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print a balances table from a report snapshot
    Balances(BalancesArgs),
    /// Print a transactions table, optionally as an account extract
    Transactions(TransactionsArgs),
}

/// Options shared by every table command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Render amounts with the book's separator and fraction digits
    #[arg(long)]
    pub format_values: bool,
    /// Render dates with the book's date pattern
    #[arg(long)]
    pub format_dates: bool,
    /// Output format, overriding the configured one
    #[arg(long, value_enum)]
    pub output: Option<OutputArg>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BalancesArgs {
    /// Balances report snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub path: PathBuf,
    /// Start from this container instead of the report root
    #[arg(long, value_name = "NAME")]
    pub container: Option<String>,
    /// Figures to show
    #[arg(long = "type", value_enum, default_value_t = BalanceTypeArg::Total)]
    pub balance_type: BalanceTypeArg,
    /// Follow each group with its descendants
    #[arg(long = "expand")]
    pub expand_groups: bool,
    /// Keep stored signs instead of normalizing by credit nature
    #[arg(long)]
    pub raw: bool,
    /// Swap rows and columns
    #[arg(long)]
    pub transposed: bool,
    /// Leave out the header row
    #[arg(long)]
    pub hide_names: bool,
    #[command(flatten)]
    pub table: TableOptions,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TransactionsArgs {
    /// Transactions listing (JSON)
    #[arg(value_name = "TRANSACTIONS")]
    pub path: PathBuf,
    /// Build an extract of the account with this id
    #[arg(long, value_name = "ID")]
    pub account: Option<String>,
    /// Append attachment URL columns
    #[arg(long = "urls")]
    pub add_urls: bool,
    #[command(flatten)]
    pub table: TableOptions,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BalanceTypeArg {
    Total,
    Period,
    Cumulative,
    Trial,
}

impl From<BalanceTypeArg> for BalanceType {
    fn from(arg: BalanceTypeArg) -> Self {
        match arg {
            BalanceTypeArg::Total => Self::Total,
            BalanceTypeArg::Period => Self::Period,
            BalanceTypeArg::Cumulative => Self::Cumulative,
            BalanceTypeArg::Trial => Self::Trial,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Tsv,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Tsv => Self::Tsv,
            OutputArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use rstest::rstest;

    fn parse(line: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ledgerlens").chain(line.split_whitespace()))
    }

    #[test]
    fn test_balances_defaults() {
        let Command::Balances(parsed) = parse("balances report.json").unwrap().command else {
            panic!("expected balances command");
        };
        assert_eq!(parsed.path, PathBuf::from("report.json"));
        assert_eq!(BalanceType::from(parsed.balance_type), BalanceType::Total);
        assert_eq!(parsed.container, None);
        assert_eq!(parsed.table, TableOptions::default());
    }

    #[test]
    fn test_balances_all_flags() {
        let Command::Balances(parsed) = parse(
            "balances --type trial r.json --container Assets --expand --raw \
             --transposed --hide-names --format-values --format-dates --output json",
        )
        .unwrap()
        .command
        else {
            panic!("expected balances command");
        };
        assert_eq!(BalanceType::from(parsed.balance_type), BalanceType::Trial);
        assert_eq!(parsed.container.as_deref(), Some("Assets"));
        assert!(parsed.expand_groups && parsed.raw && parsed.transposed && parsed.hide_names);
        assert!(parsed.table.format_values && parsed.table.format_dates);
        assert_eq!(parsed.table.output.map(OutputFormat::from), Some(OutputFormat::Json));
    }

    #[test]
    fn test_transactions() {
        let Command::Transactions(parsed) = parse("transactions tx.json --account acc-1 --urls")
            .unwrap()
            .command
        else {
            panic!("expected transactions command");
        };
        assert_eq!(parsed.path, PathBuf::from("tx.json"));
        assert_eq!(parsed.account.as_deref(), Some("acc-1"));
        assert!(parsed.add_urls);
    }

    #[rstest]
    #[case("help")]
    #[case("--help")]
    #[case("balances --help")]
    fn test_help_exits_cleanly(#[case] line: &str) {
        let err = parse(line).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[rstest]
    #[case("")]
    #[case("export report.json")]
    #[case("balances")]
    #[case("balances a.json b.json")]
    #[case("balances a.json --type weekly")]
    #[case("balances a.json --container")]
    #[case("transactions a.json --verbose")]
    #[case("transactions a.json --output xml")]
    fn test_usage_errors_exit_with_two(#[case] line: &str) {
        let err = parse(line).unwrap_err();
        assert_eq!(err.exit_code(), 2, "{line}");
    }
}
