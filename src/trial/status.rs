//! Classifies trial monitor accounts from their transaction history.

use serde::Deserialize;

use crate::account::AccountType;

use super::core::TrialAccount;

/// The volume and activity limits used to classify accounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationThresholds {
    /// Accounts whose total volume is above this are partners.
    pub partner_volume: f64,
    /// Accounts whose total volume is above this (and not above
    /// `partner_volume`) are potential partners.
    pub potential_volume: f64,
    /// Trial accounts with transactions in at least this many ranges need a review.
    pub trial_active_ranges: usize,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            partner_volume: 200_000_000.0,
            potential_volume: 50_000_000.0,
            trial_active_ranges: 3,
        }
    }
}

/// The category an account falls into based on its transaction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountStatus {
    Normal,
    Potential,
    Partner,
    /// A trial account that transacts in so many ranges that it may be used
    /// beyond a trial.
    NeedsReview,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 4] = [
        AccountStatus::NeedsReview,
        AccountStatus::Partner,
        AccountStatus::Potential,
        AccountStatus::Normal,
    ];

    /// The text shown in the status badge.
    pub fn label(self) -> &'static str {
        match self {
            AccountStatus::Normal => "Normal",
            AccountStatus::Potential => "Tiềm năng",
            AccountStatus::Partner => "Đối tác",
            AccountStatus::NeedsReview => "Cần kiểm tra",
        }
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            AccountStatus::Normal => "normal",
            AccountStatus::Potential => "potential",
            AccountStatus::Partner => "partner",
            AccountStatus::NeedsReview => "needs-review",
        }
    }
}

/// Work out the status of `account`.
///
/// A trial account with transactions in at least
/// [ClassificationThresholds::trial_active_ranges] ranges needs a review.
/// Otherwise the status depends on the total volume over all ranges.
pub fn classify_account(
    account: &TrialAccount,
    thresholds: &ClassificationThresholds,
) -> AccountStatus {
    if account.account_type == AccountType::Trial
        && account.active_range_count() >= thresholds.trial_active_ranges
    {
        return AccountStatus::NeedsReview;
    }

    let total_volume = account.total_volume();

    if total_volume > thresholds.partner_volume {
        AccountStatus::Partner
    } else if total_volume > thresholds.potential_volume {
        AccountStatus::Potential
    } else {
        AccountStatus::Normal
    }
}
