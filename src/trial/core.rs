use std::collections::HashMap;

use serde::Deserialize;

use crate::{Error, account::AccountType};

use super::range::{DateRange, RawRangeDate, compute_range_dates};

/// Contact details of a trial account.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct TrialMetadata {
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// The number of valid transactions of an account in one range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeCount {
    /// A month name for sample data or a formatted date range for backend data.
    pub label: String,
    /// The dates the count covers, if known.
    pub range: Option<DateRange>,
    pub valid_txn_cnt: f64,
}

/// An account tracked by the trial monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialAccount {
    pub account_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub metadata: Option<TrialMetadata>,
    /// One count per range, oldest range first.
    pub monthly_data: Vec<RangeCount>,
}

impl TrialAccount {
    /// The sum of the counts over all ranges.
    pub fn total_volume(&self) -> f64 {
        self.monthly_data
            .iter()
            .map(|range| range.valid_txn_cnt)
            .sum()
    }

    /// The number of ranges with at least one transaction.
    pub fn active_range_count(&self) -> usize {
        self.monthly_data
            .iter()
            .filter(|range| range.valid_txn_cnt > 0.0)
            .count()
    }
}

/// An account as sent by the trial monitor endpoint.
///
/// The count of each range is stored under the range's index, e.g. `"0"`,
/// `"1"`, and is either a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTrialAccount {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub metadata: Option<TrialMetadata>,
    #[serde(flatten)]
    pub counts: HashMap<String, serde_json::Value>,
}

impl RawTrialAccount {
    /// Get the count for the range at `index`.
    ///
    /// A missing or null count is treated as zero.
    fn count_for(&self, index: usize) -> Result<f64, Error> {
        let count = match self.counts.get(&index.to_string()) {
            None | Some(serde_json::Value::Null) => return Ok(0.0),
            Some(serde_json::Value::Number(number)) => number.as_f64(),
            Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        count.ok_or_else(|| {
            Error::MalformedResponse(format!(
                "count \"{index}\" of account {} is not a number",
                self.account_id
            ))
        })
    }
}

/// The body of a trial monitor response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrialMonitorResponse {
    pub data: Vec<RawTrialAccount>,
    #[serde(rename = "rangeDates", default)]
    pub range_dates: Vec<RawRangeDate>,
}

/// Turn a trial monitor response into accounts with one count per range,
/// oldest range first.
///
/// The backend's range dates are paired with the counts by index and then
/// sorted by their start date. If the backend did not send range dates, they
/// are computed from `window` and `range_count`, with index `"0"` holding the
/// most recent range.
///
/// # Errors
/// Returns [Error::MalformedResponse] if a range date or count cannot be parsed.
pub fn build_trial_accounts(
    response: TrialMonitorResponse,
    window: DateRange,
    range_count: usize,
) -> Result<Vec<TrialAccount>, Error> {
    let mut indexed_ranges: Vec<(usize, DateRange)> = if response.range_dates.is_empty() {
        compute_range_dates(window, range_count)?
            .into_iter()
            .rev()
            .enumerate()
            .collect()
    } else {
        if response.range_dates.len() != range_count {
            tracing::warn!(
                "requested {range_count} ranges but the backend sent {}",
                response.range_dates.len()
            );
        }

        response
            .range_dates
            .iter()
            .map(DateRange::try_from)
            .enumerate()
            .map(|(index, range)| range.map(|range| (index, range)))
            .collect::<Result<_, _>>()?
    };
    indexed_ranges.sort_by_key(|(_, range)| range.from);

    response
        .data
        .into_iter()
        .map(|raw| {
            let monthly_data = indexed_ranges
                .iter()
                .map(|&(index, range)| {
                    Ok(RangeCount {
                        label: range.label(),
                        range: Some(range),
                        valid_txn_cnt: raw.count_for(index)?,
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?;

            Ok(TrialAccount {
                account_id: raw.account_id,
                name: raw.name,
                account_type: raw.account_type,
                metadata: raw.metadata,
                monthly_data,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, account::AccountType, trial::range::DateRange};

    use super::{TrialMonitorResponse, build_trial_accounts};

    fn window() -> DateRange {
        DateRange::new(date!(2025 - 01 - 01), date!(2025 - 01 - 30)).unwrap()
    }

    #[test]
    fn pairs_counts_with_backend_ranges_sorted_by_start() {
        let json = r#"{
            "data": [{
                "account_id": "d33cd122",
                "name": "FUTA",
                "account_type": "TRIAL",
                "metadata": { "contact_name": "Nguyễn Văn A", "email": "a@futa.vn" },
                "0": 30,
                "1": "20",
                "2": 10
            }],
            "rangeDates": [
                { "fromDate": "2025-01-21", "toDate": "2025-01-30" },
                { "fromDate": "2025-01-11", "toDate": "2025-01-20" },
                { "fromDate": "2025-01-01", "toDate": "2025-01-10" }
            ]
        }"#;
        let response: TrialMonitorResponse = serde_json::from_str(json).unwrap();

        let accounts = build_trial_accounts(response, window(), 3).unwrap();

        assert_eq!(accounts.len(), 1);
        let account = &accounts[0];
        assert_eq!(account.account_type, AccountType::Trial);
        assert_eq!(
            account.metadata.as_ref().and_then(|m| m.contact_name.as_deref()),
            Some("Nguyễn Văn A")
        );
        let counts: Vec<f64> = account.monthly_data.iter().map(|r| r.valid_txn_cnt).collect();
        assert_eq!(counts, [10.0, 20.0, 30.0]);
        assert_eq!(account.monthly_data[0].label, "01/01/2025 - 10/01/2025");
        assert_eq!(account.monthly_data[2].label, "21/01/2025 - 30/01/2025");
    }

    #[test]
    fn computes_ranges_when_backend_omits_them() {
        let json = r#"{
            "data": [{ "account_id": "a", "name": "A", "0": 3, "1": 2, "2": 1 }]
        }"#;
        let response: TrialMonitorResponse = serde_json::from_str(json).unwrap();

        let accounts = build_trial_accounts(response, window(), 3).unwrap();

        let account = &accounts[0];
        assert_eq!(account.account_type, AccountType::None);
        let counts: Vec<f64> = account.monthly_data.iter().map(|r| r.valid_txn_cnt).collect();
        assert_eq!(counts, [1.0, 2.0, 3.0]);
        assert_eq!(
            account.monthly_data[2].range,
            Some(DateRange {
                from: date!(2025 - 01 - 21),
                to: date!(2025 - 01 - 30)
            })
        );
    }

    #[test]
    fn missing_and_null_counts_are_zero() {
        let json = r#"{
            "data": [{ "account_id": "a", "name": "A", "metadata": null, "0": null }],
            "rangeDates": [
                { "fromDate": "2025-01-16", "toDate": "2025-01-30" },
                { "fromDate": "2025-01-01", "toDate": "2025-01-15" }
            ]
        }"#;
        let response: TrialMonitorResponse = serde_json::from_str(json).unwrap();

        let accounts = build_trial_accounts(response, window(), 2).unwrap();

        assert_eq!(accounts[0].metadata, None);
        assert_eq!(accounts[0].total_volume(), 0.0);
        assert_eq!(accounts[0].monthly_data.len(), 2);
    }

    #[test]
    fn rejects_non_numeric_counts() {
        let json = r#"{
            "data": [{ "account_id": "a", "name": "A", "0": "lots" }],
            "rangeDates": [{ "fromDate": "2025-01-01", "toDate": "2025-01-30" }]
        }"#;
        let response: TrialMonitorResponse = serde_json::from_str(json).unwrap();

        let result = build_trial_accounts(response, window(), 1);

        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn rejects_invalid_range_dates() {
        let json = r#"{
            "data": [],
            "rangeDates": [{ "fromDate": "2025-02-01", "toDate": "2025-01-01" }]
        }"#;
        let response: TrialMonitorResponse = serde_json::from_str(json).unwrap();

        let result = build_trial_accounts(response, window(), 1);

        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }
}
