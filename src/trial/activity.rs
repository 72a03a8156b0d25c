//! Activity checks on trial monitor accounts.

use super::core::TrialAccount;

/// Drop the accounts without any transactions in any range, keeping the order
/// of the remaining accounts.
pub fn filter_active_accounts(accounts: Vec<TrialAccount>) -> Vec<TrialAccount> {
    accounts
        .into_iter()
        .filter(|account| account.total_volume() > 0.0)
        .collect()
}

/// How busy an account was in a single range, used to highlight table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountLevel {
    None,
    Moderate,
    Elevated,
    High,
}

impl CountLevel {
    pub fn from_count(count: f64) -> Self {
        if count > 10_000.0 {
            CountLevel::High
        } else if count > 5_000.0 {
            CountLevel::Elevated
        } else if count > 1_000.0 {
            CountLevel::Moderate
        } else {
            CountLevel::None
        }
    }

    /// The background color class for table cells.
    pub fn cell_class(self) -> &'static str {
        match self {
            CountLevel::High => "bg-red-100 dark:bg-red-900/40",
            CountLevel::Elevated => "bg-yellow-100 dark:bg-yellow-900/40",
            CountLevel::Moderate => "bg-green-100 dark:bg-green-900/40",
            CountLevel::None => "",
        }
    }

    /// The badge class for the per-range breakdown.
    pub fn badge_class(self) -> &'static str {
        match self {
            CountLevel::High => "bg-red-600 text-white",
            CountLevel::Elevated => "bg-gray-200 text-gray-900 dark:bg-gray-600 dark:text-white",
            CountLevel::Moderate => "bg-blue-600 text-white",
            CountLevel::None => "border border-gray-300 text-gray-700 dark:text-gray-300",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        account::AccountType,
        trial::core::{RangeCount, TrialAccount},
    };

    use super::{CountLevel, filter_active_accounts};

    fn account(id: &str, counts: &[f64]) -> TrialAccount {
        TrialAccount {
            account_id: id.to_owned(),
            name: id.to_uppercase(),
            account_type: AccountType::Trial,
            metadata: None,
            monthly_data: counts
                .iter()
                .map(|&count| RangeCount {
                    label: "Jan".to_owned(),
                    range: None,
                    valid_txn_cnt: count,
                })
                .collect(),
        }
    }

    #[test]
    fn drops_accounts_without_transactions() {
        let accounts = vec![
            account("a", &[0.0, 0.0, 0.0]),
            account("b", &[0.0, 4.0, 0.0]),
            account("c", &[0.0, 0.0, 0.0]),
            account("d", &[1.0, 1.0, 1.0]),
        ];

        let active = filter_active_accounts(accounts);

        let ids: Vec<&str> = active.iter().map(|a| a.account_id.as_str()).collect();
        assert_eq!(ids, ["b", "d"]);
        assert!(active.iter().all(|a| !a.monthly_data.is_empty()));
    }

    #[test]
    fn drops_accounts_without_ranges() {
        assert!(filter_active_accounts(vec![account("a", &[])]).is_empty());
    }

    #[test]
    fn count_levels_use_exclusive_bounds() {
        assert_eq!(CountLevel::from_count(0.0), CountLevel::None);
        assert_eq!(CountLevel::from_count(1_000.0), CountLevel::None);
        assert_eq!(CountLevel::from_count(1_001.0), CountLevel::Moderate);
        assert_eq!(CountLevel::from_count(5_001.0), CountLevel::Elevated);
        assert_eq!(CountLevel::from_count(10_000.0), CountLevel::Elevated);
        assert_eq!(CountLevel::from_count(10_001.0), CountLevel::High);
    }
}
