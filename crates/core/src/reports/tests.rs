//! Property-based and unit tests for the reports module.

use std::sync::Arc;

use ledgerlens_shared::BookSettings;
use ledgerlens_shared::types::{Amount, DecimalSeparator, Periodicity};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::book::Book;

fn book(digits: u32, separator: DecimalSeparator) -> Arc<dyn Book> {
    Arc::new(BookSettings {
        fraction_digits: digits,
        decimal_separator: separator,
        ..BookSettings::default()
    })
}

fn figures(cumulative_balance: Decimal, period_balance: Decimal) -> BalanceFigures {
    BalanceFigures {
        cumulative_balance: cumulative_balance.into(),
        period_balance: period_balance.into(),
        ..BalanceFigures::default()
    }
}

fn account(name: &str, credit: bool, balance: Decimal) -> AccountSnapshot {
    AccountSnapshot {
        name: name.to_string(),
        credit,
        permanent: false,
        figures: figures(balance, balance),
        balances: Vec::new(),
    }
}

fn group(name: &str, groups: Vec<GroupSnapshot>, accounts: Vec<AccountSnapshot>) -> GroupSnapshot {
    GroupSnapshot {
        name: name.to_string(),
        credit: false,
        figures: BalanceFigures::default(),
        balances: Vec::new(),
        groups: groups.into_iter().map(Arc::new).collect(),
        accounts: accounts.into_iter().map(Arc::new).collect(),
    }
}

/// Assets > (Current > Cash, Bank), Building
fn sample_report() -> BalancesReport {
    let current = group(
        "Current",
        Vec::new(),
        vec![
            account("Cash", false, dec!(100)),
            account("Bank", false, dec!(250.5)),
        ],
    );
    let assets = group(
        "Assets",
        vec![current],
        vec![account("Building", false, dec!(1000))],
    );
    BalancesReport::new(
        book(2, DecimalSeparator::Dot),
        Periodicity::Monthly,
        [
            ContainerSnapshot::from(assets),
            ContainerSnapshot::from(account("Revenue", true, dec!(-40))),
        ],
    )
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64, 0u32..6).prop_map(|(num, scale)| Decimal::new(num, scale))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A container is always exactly one of account or group.
    #[test]
    fn prop_account_xor_group(is_group in any::<bool>(), credit in any::<bool>()) {
        let snapshot = if is_group {
            ContainerSnapshot::from(group("G", Vec::new(), Vec::new()))
        } else {
            ContainerSnapshot::from(account("A", credit, dec!(1)))
        };
        let report = BalancesReport::new(book(2, DecimalSeparator::Dot), Periodicity::Monthly, [snapshot]);
        let container = &report.balances_containers()[0];

        prop_assert_ne!(container.is_from_account(), container.is_from_group());
        prop_assert_eq!(container.is_from_group(), is_group);
        // Neither variant has children here: a leaf never does, the group is empty.
        prop_assert!(container.balances_containers().is_empty());
        prop_assert!(!container.is_from_parent_group());
    }

    /// Debit-natured balances read as the negated raw balance; credit-natured
    /// balances read as stored.
    #[test]
    fn prop_balance_normalized_by_nature(value in amount_strategy(), credit in any::<bool>()) {
        let report = BalancesReport::new(
            book(8, DecimalSeparator::Dot),
            Periodicity::Monthly,
            [ContainerSnapshot::from(account("A", credit, value))],
        );
        let container = &report.balances_containers()[0];

        let expected = if credit {
            container.cumulative_balance_raw()
        } else {
            -container.cumulative_balance_raw()
        };
        prop_assert_eq!(container.cumulative_balance(), expected);
        prop_assert_eq!(container.cumulative_balance_raw(), Amount::from(value));
    }

    /// Formatted text equals the raw value rounded half up to the book digits.
    #[test]
    fn prop_text_matches_rounded_value(value in amount_strategy(), digits in 0u32..5) {
        let report = BalancesReport::new(
            book(digits, DecimalSeparator::Comma),
            Periodicity::Monthly,
            [ContainerSnapshot::from(account("A", true, value))],
        );
        let container = &report.balances_containers()[0];

        let expected = Amount::from(value)
            .to_text(Some(digits))
            .replace('.', ",");
        prop_assert_eq!(container.cumulative_balance_text(), expected);
    }
}

#[test]
fn test_children_groups_first_then_accounts() {
    let report = sample_report();
    let assets = report.balances_container("Assets").unwrap();

    let names: Vec<_> = assets
        .balances_containers()
        .iter()
        .map(BalancesContainer::name)
        .collect();
    assert_eq!(names, ["Current", "Building"]);
    assert!(assets.is_from_parent_group());

    let current = &assets.balances_containers()[0];
    assert!(current.is_from_group());
    assert!(!current.is_from_parent_group());
    assert_eq!(current.balances_containers().len(), 2);
}

#[test]
fn test_children_materialized_once() {
    let report = sample_report();
    let assets = &report.balances_containers()[0];

    let first = assets.balances_containers();
    let second = assets.balances_containers();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(&first[0], &second[0]));
}

#[test]
fn test_account_has_no_children() {
    let report = sample_report();
    let revenue = report.balances_container("Revenue").unwrap();

    assert!(revenue.is_from_account());
    assert!(!revenue.is_from_parent_group());
    assert!(revenue.balances_containers().is_empty());
    assert!(revenue.balances().is_empty());
}

#[test]
fn test_find_nested_container() {
    let report = sample_report();

    let bank = report.balances_container("Bank").unwrap();
    assert_eq!(bank.cumulative_balance(), Amount::Finite(dec!(-250.5)));
    assert_eq!(bank.cumulative_balance_text(), "-250.50");
    assert!(report.balances_container("Missing").is_none());
}

#[test]
fn test_top_level_order_kept() {
    let report = sample_report();
    let names: Vec<_> = report
        .balances_containers()
        .iter()
        .map(BalancesContainer::name)
        .collect();
    assert_eq!(names, ["Assets", "Revenue"]);
}

#[test]
fn test_rounding_half_up() {
    let report = BalancesReport::new(
        book(2, DecimalSeparator::Comma),
        Periodicity::Monthly,
        [ContainerSnapshot::from(account("Fees", true, dec!(2.345)))],
    );
    let fees = &report.balances_containers()[0];

    assert_eq!(fees.cumulative_balance(), Amount::Finite(dec!(2.35)));
    assert_eq!(fees.cumulative_balance_text(), "2,35");
    assert_eq!(fees.period_balance_raw_text(), "2,35");
}

#[test]
fn test_balances_share_container_rules() {
    let mut cash = account("Cash", false, dec!(30));
    cash.balances = vec![
        BalanceSnapshot::new(2026_01_00, figures(dec!(10), dec!(10))).unwrap(),
        BalanceSnapshot::new(2026_02_00, figures(dec!(30), dec!(20))).unwrap(),
    ];
    let report = BalancesReport::new(
        book(1, DecimalSeparator::Dot),
        Periodicity::Monthly,
        [ContainerSnapshot::from(cash)],
    );
    let container = &report.balances_containers()[0];
    let balances = container.balances();

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[1].month(), Some(2));
    assert_eq!(balances[1].day(), None);
    assert_eq!(balances[1].period_balance(), Amount::Finite(dec!(-20)));
    assert_eq!(balances[1].cumulative_balance_text(), "-30.0");
    assert!(std::ptr::eq(balances[0].container(), container));
}

#[test]
fn test_non_finite_figures_format() {
    let mut broken = account("Broken", true, dec!(0));
    broken.figures.cumulative_balance = Amount::PositiveInfinity;
    broken.figures.period_balance = Amount::NaN;
    let report = BalancesReport::new(
        book(2, DecimalSeparator::Dot),
        Periodicity::Monthly,
        [ContainerSnapshot::from(broken)],
    );
    let container = &report.balances_containers()[0];

    assert_eq!(container.cumulative_balance_text(), "∞");
    assert_eq!(container.period_balance_text(), "");
}

#[test]
fn test_from_payload_rejects_missing_credit() {
    let payload = ReportPayload {
        account_balances: Some(vec![AccountBalancesPayload {
            name: Some("Cash".to_string()),
            ..AccountBalancesPayload::default()
        }]),
        ..ReportPayload::default()
    };
    let result = BalancesReport::from_payload(book(2, DecimalSeparator::Dot), payload);
    assert!(matches!(
        result,
        Err(ReportError::MissingCreditNature { name }) if name == "Cash"
    ));
}

#[test]
fn test_from_payload_periodicity() {
    let settings = BookSettings {
        periodicity: Periodicity::Yearly,
        ..BookSettings::default()
    };
    let book: Arc<dyn Book> = Arc::new(settings);

    let defaulted = BalancesReport::from_payload(Arc::clone(&book), ReportPayload::default()).unwrap();
    assert_eq!(defaulted.periodicity(), Periodicity::Yearly);
    assert!(defaulted.balances_containers().is_empty());

    let explicit = BalancesReport::from_payload(
        book,
        ReportPayload {
            periodicity: Some(Periodicity::Daily),
            ..ReportPayload::default()
        },
    )
    .unwrap();
    assert_eq!(explicit.periodicity(), Periodicity::Daily);
}
