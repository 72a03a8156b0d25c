use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The billing plan of a business account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Trial,
    Standard,
    Enterprise,
    Internal,
    #[default]
    None,
    All,
}

impl AccountType {
    /// The account types that are shown as separate groups in summaries and charts.
    pub const GROUPED: [AccountType; 5] = [
        AccountType::Trial,
        AccountType::Internal,
        AccountType::Standard,
        AccountType::Enterprise,
        AccountType::None,
    ];

    /// The account types that can be picked in the statistics summary.
    pub const SELECTABLE: [AccountType; 4] = [
        AccountType::Trial,
        AccountType::Internal,
        AccountType::Standard,
        AccountType::Enterprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Trial => "TRIAL",
            AccountType::Standard => "STANDARD",
            AccountType::Enterprise => "ENTERPRISE",
            AccountType::Internal => "INTERNAL",
            AccountType::None => "NONE",
            AccountType::All => "ALL",
        }
    }

    /// The color used for the account type in charts.
    pub fn color(self) -> &'static str {
        match self {
            AccountType::None => "#CBD5E1",
            AccountType::Trial => "#38BDF8",
            AccountType::Internal => "#818CF8",
            AccountType::Standard => "#10B981",
            AccountType::Enterprise => "#F59E0B",
            AccountType::All => "#64748B",
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The person to get in touch with about an account.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub contact: Contact,
    /// The account's timezone as reported by the backend, e.g. "GMT+7".
    #[serde(default)]
    pub time_zone: String,
}

/// A row of the account summary as sent by the analytics backend.
///
/// Any `diff` or `percentage` sent by the backend is ignored, both are derived
/// from the two counts when building an [AccountSummary].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountSummaryRow {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub metadata: Metadata,
    pub valid_txn_cnt: f64,
    pub valid_txn_cnt_range_before: f64,
}

/// The transaction volume of an account in the selected period compared to the
/// period before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub account_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub metadata: Metadata,
    /// The number of valid transactions in the selected period.
    pub valid_txn_cnt: f64,
    /// The number of valid transactions in the period before the selected period.
    pub valid_txn_cnt_range_before: f64,
    /// `valid_txn_cnt - valid_txn_cnt_range_before`.
    pub diff: f64,
    /// `diff` relative to the previous period in percent, rounded to two decimals.
    pub percentage: f64,
}

impl From<AccountSummaryRow> for AccountSummary {
    fn from(row: AccountSummaryRow) -> Self {
        let diff = row.valid_txn_cnt - row.valid_txn_cnt_range_before;

        Self {
            account_id: row.account_id,
            name: row.name,
            account_type: row.account_type,
            metadata: row.metadata,
            valid_txn_cnt: row.valid_txn_cnt,
            valid_txn_cnt_range_before: row.valid_txn_cnt_range_before,
            diff,
            percentage: calculate_percentage(diff, row.valid_txn_cnt_range_before),
        }
    }
}

/// Calculate `diff` as a percentage of `previous`, rounded to two decimals.
///
/// Returns zero if `previous` is zero.
pub fn calculate_percentage(diff: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }

    let percentage = diff / previous * 100.0;
    (percentage * 100.0).round() / 100.0
}
