//! Totals across account types for the statistics summary.
//!
//! Counts are rounded to whole transactions before they are summed, so the
//! totals match the rounded numbers shown in the account table.

use serde::Deserialize;

use crate::account::{AccountSummary, AccountType, calculate_percentage};

/// The account types selected when the user has not picked any.
pub const DEFAULT_SELECTED_TYPES: [AccountType; 4] = AccountType::SELECTABLE;

/// The transaction totals of a set of accounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub current: f64,
    pub previous: f64,
    pub diff: f64,
    /// `diff` relative to `previous` in percent, zero if `previous` is zero.
    pub percentage: f64,
}

impl Totals {
    fn from_sums(current: f64, previous: f64) -> Self {
        let diff = current - previous;

        Self {
            current,
            previous,
            diff,
            percentage: calculate_percentage(diff, previous),
        }
    }
}

/// The totals of the accounts of one type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeTotals {
    pub account_type: AccountType,
    pub current: f64,
    pub previous: f64,
}

/// Which chart the statistics summary shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartMode {
    /// Current and previous totals of the selected types.
    #[default]
    Overview,
    /// The share of each account type of the current total.
    ByType,
    /// Current and previous totals per selected type.
    Comparison,
}

impl ChartMode {
    pub const ALL: [ChartMode; 3] = [ChartMode::Overview, ChartMode::ByType, ChartMode::Comparison];

    pub fn label(self) -> &'static str {
        match self {
            ChartMode::Overview => "Tổng quan",
            ChartMode::ByType => "Theo loại",
            ChartMode::Comparison => "So sánh",
        }
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            ChartMode::Overview => "overview",
            ChartMode::ByType => "by-type",
            ChartMode::Comparison => "comparison",
        }
    }
}

/// Sum the counts of the accounts whose type is in `selected_types`.
pub fn calculate_totals(accounts: &[AccountSummary], selected_types: &[AccountType]) -> Totals {
    let (current, previous) = accounts
        .iter()
        .filter(|account| selected_types.contains(&account.account_type))
        .fold((0.0, 0.0), |(current, previous), account| {
            (
                current + account.valid_txn_cnt.round(),
                previous + account.valid_txn_cnt_range_before.round(),
            )
        });

    Totals::from_sums(current, previous)
}

/// Sum the counts per account type.
///
/// Types are listed in the order of [AccountType::GROUPED] and types without
/// any accounts are left out.
pub fn totals_by_type(accounts: &[AccountSummary]) -> Vec<TypeTotals> {
    AccountType::GROUPED
        .iter()
        .filter_map(|&account_type| {
            let mut accounts_of_type = accounts
                .iter()
                .filter(|account| account.account_type == account_type)
                .peekable();

            accounts_of_type.peek()?;

            let (current, previous) =
                accounts_of_type.fold((0.0, 0.0), |(current, previous), account| {
                    (
                        current + account.valid_txn_cnt.round(),
                        previous + account.valid_txn_cnt_range_before.round(),
                    )
                });

            Some(TypeTotals {
                account_type,
                current,
                previous,
            })
        })
        .collect()
}

/// The per-type totals for the comparison chart, limited to `selected_types`.
pub fn comparison_totals(
    accounts: &[AccountSummary],
    selected_types: &[AccountType],
) -> Vec<TypeTotals> {
    totals_by_type(accounts)
        .into_iter()
        .filter(|totals| selected_types.contains(&totals.account_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::account::{AccountSummary, AccountType};

    use super::{
        ChartMode, DEFAULT_SELECTED_TYPES, Totals, TypeTotals, calculate_totals,
        comparison_totals, totals_by_type,
    };

    fn account(account_type: AccountType, current: f64, previous: f64) -> AccountSummary {
        AccountSummary {
            account_id: format!("{account_type}-{current}"),
            name: account_type.to_string(),
            account_type,
            metadata: Default::default(),
            valid_txn_cnt: current,
            valid_txn_cnt_range_before: previous,
            diff: current - previous,
            percentage: 0.0,
        }
    }

    fn accounts() -> Vec<AccountSummary> {
        vec![
            account(AccountType::Trial, 100.4, 50.0),
            account(AccountType::Trial, 49.6, 50.0),
            account(AccountType::Enterprise, 1_000.0, 800.0),
            account(AccountType::None, 500.0, 0.0),
        ]
    }

    #[test]
    fn totals_only_include_selected_types() {
        let totals = calculate_totals(&accounts(), &DEFAULT_SELECTED_TYPES);

        assert_eq!(
            totals,
            Totals {
                current: 1_150.0,
                previous: 900.0,
                diff: 250.0,
                percentage: 27.78,
            }
        );
    }

    #[test]
    fn totals_round_each_count_before_summing() {
        let totals = calculate_totals(&accounts(), &[AccountType::Trial]);

        // 100.4 rounds down and 49.6 rounds up.
        assert_eq!(totals.current, 150.0);
        assert_eq!(totals.percentage, 50.0);
    }

    #[test]
    fn percentage_is_zero_without_previous_transactions() {
        let totals = calculate_totals(&accounts(), &[AccountType::None]);

        assert_eq!(totals.diff, 500.0);
        assert_eq!(totals.percentage, 0.0);
    }

    #[test]
    fn empty_selection_has_zero_totals() {
        let totals = calculate_totals(&accounts(), &[]);

        assert_eq!(totals.current, 0.0);
        assert_eq!(totals.percentage, 0.0);
    }

    #[test]
    fn groups_totals_by_type_in_display_order() {
        let by_type = totals_by_type(&accounts());

        assert_eq!(
            by_type,
            [
                TypeTotals {
                    account_type: AccountType::Trial,
                    current: 150.0,
                    previous: 100.0,
                },
                TypeTotals {
                    account_type: AccountType::Enterprise,
                    current: 1_000.0,
                    previous: 800.0,
                },
                TypeTotals {
                    account_type: AccountType::None,
                    current: 500.0,
                    previous: 0.0,
                },
            ]
        );
    }

    #[test]
    fn comparison_is_limited_to_selected_types() {
        let comparison = comparison_totals(&accounts(), &[AccountType::Enterprise]);

        let types: Vec<AccountType> = comparison.iter().map(|t| t.account_type).collect();
        assert_eq!(types, [AccountType::Enterprise]);
    }

    #[test]
    fn parses_chart_mode() {
        let mode: ChartMode = serde_json::from_str("\"by-type\"").unwrap();

        assert_eq!(mode, ChartMode::ByType);
        assert_eq!(mode.as_query_value(), "by-type");
        assert_eq!(ChartMode::default(), ChartMode::Overview);
    }
}
