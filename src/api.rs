//! The client for the analytics backend.
//!
//! Both loaders never fail: if the backend cannot be reached or sends
//! something unexpected, the error is logged and the built-in sample data is
//! returned together with an alert telling the user what happened.

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use reqwest::Client;
use time::Date;

use crate::{
    Error,
    account::{AccountSummary, AccountSummaryRow, sample_account_summaries},
    alert::Alert,
    trial::{
        DateRange, TrialAccount, TrialMonitorResponse, build_trial_accounts,
        filter_active_accounts, format_month_day_year, generate_sample_data,
    },
};

/// Where the dashboard gets its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Query the analytics backend, falling back to sample data on failure.
    Live,
    /// Always show the sample data, e.g. for local development.
    Sample,
}

/// Where the data of a [FetchOutcome] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Backend,
    Sample,
}

/// The result of loading data for a page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    pub data: T,
    pub source: DataSource,
    /// Set when the backend request failed and sample data is shown instead.
    pub alert: Option<Alert>,
}

impl<T> FetchOutcome<T> {
    fn from_backend(data: T) -> Self {
        Self {
            data,
            source: DataSource::Backend,
            alert: None,
        }
    }

    fn from_sample(data: T, alert: Option<Alert>) -> Self {
        Self {
            data,
            source: DataSource::Sample,
            alert,
        }
    }
}

/// Sends requests to the account summary and trial monitor endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    account_summary_url: String,
    trial_monitor_url: String,
    mode: DataMode,
}

impl ApiClient {
    /// Create a client for the given endpoint URLs.
    ///
    /// Requests that take longer than `timeout` are treated as failed.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built, e.g.
    /// if the TLS backend cannot be initialized.
    pub fn new(
        account_summary_url: &str,
        trial_monitor_url: &str,
        timeout: Duration,
        mode: DataMode,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .inspect_err(|error| tracing::error!("could not build HTTP client: {error}"))?;

        Ok(Self {
            client,
            account_summary_url: account_summary_url.to_owned(),
            trial_monitor_url: trial_monitor_url.to_owned(),
            mode,
        })
    }

    /// Whether the client queries the backend or only serves sample data.
    pub fn mode(&self) -> DataMode {
        self.mode
    }

    /// Get the account summaries for `window` from the backend.
    ///
    /// # Errors
    /// Returns an error if the request fails, the backend responds with a
    /// non-2xx status or the body is not a list of account summaries.
    pub async fn fetch_account_summaries(
        &self,
        window: DateRange,
    ) -> Result<Vec<AccountSummary>, Error> {
        let from_date = window.from.to_string();
        let to_date = window.to.to_string();
        tracing::debug!("Fetching account summaries from {from_date} to {to_date}");

        let rows: Vec<AccountSummaryRow> = self
            .client
            .get(&self.account_summary_url)
            .query(&[("fromDate", &from_date), ("toDate", &to_date)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows.into_iter().map(AccountSummary::from).collect())
    }

    /// Get the trial monitor accounts for `window` split into `range_count`
    /// ranges from the backend.
    ///
    /// # Errors
    /// Returns an error if the request fails, the backend responds with a
    /// non-2xx status or the body is not a valid trial monitor response.
    pub async fn fetch_trial_accounts(
        &self,
        window: DateRange,
        range_count: usize,
    ) -> Result<Vec<TrialAccount>, Error> {
        let from_date = format_month_day_year(window.from);
        let to_date = format_month_day_year(window.to);
        tracing::info!(
            "Fetching trial monitor data from {from_date} to {to_date} with {range_count} ranges"
        );

        let response: TrialMonitorResponse = self
            .client
            .get(&self.trial_monitor_url)
            .query(&[
                ("account_type", "TRIAL"),
                ("numberOfRangeRequests", &range_count.to_string()),
                ("fromDate", &from_date),
                ("toDate", &to_date),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        build_trial_accounts(response, window, range_count)
    }
}

/// Load the account summaries for `window`, falling back to sample data.
pub async fn load_account_summaries(
    client: &ApiClient,
    window: DateRange,
) -> FetchOutcome<Vec<AccountSummary>> {
    if client.mode() == DataMode::Sample {
        return FetchOutcome::from_sample(sample_account_summaries(), None);
    }

    match client.fetch_account_summaries(window).await {
        Ok(accounts) => FetchOutcome::from_backend(accounts),
        Err(error) => {
            tracing::error!("Failed to fetch account summaries: {error}");
            FetchOutcome::from_sample(sample_account_summaries(), Some(error.into_alert()))
        }
    }
}

/// Sample trial accounts that are the same for every request with the same
/// window and range count, so filtering or selecting an account does not
/// reshuffle the counts.
fn sample_trial_accounts(window: DateRange, range_count: usize, today: Date) -> Vec<TrialAccount> {
    let seed = (i64::from(window.from.to_julian_day()) << 32)
        ^ i64::from(window.to.to_julian_day())
        ^ ((range_count as i64) << 56);
    let mut rng = StdRng::seed_from_u64(seed as u64);

    generate_sample_data(range_count, today, &mut rng)
}

/// Load the trial monitor accounts for `window`, falling back to sample data.
///
/// Accounts without any transactions in any range are left out.
pub async fn load_trial_accounts(
    client: &ApiClient,
    window: DateRange,
    range_count: usize,
    today: Date,
) -> FetchOutcome<Vec<TrialAccount>> {
    if client.mode() == DataMode::Sample {
        let accounts = sample_trial_accounts(window, range_count, today);
        return FetchOutcome::from_sample(filter_active_accounts(accounts), None);
    }

    match client.fetch_trial_accounts(window, range_count).await {
        Ok(accounts) => FetchOutcome::from_backend(filter_active_accounts(accounts)),
        Err(error) => {
            tracing::error!("Failed to fetch trial monitor data: {error}");
            let accounts = sample_trial_accounts(window, range_count, today);

            FetchOutcome::from_sample(filter_active_accounts(accounts), Some(error.into_alert()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use time::macros::date;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use crate::{Error, alert::Alert, trial::DateRange};

    use super::{
        ApiClient, DataMode, DataSource, load_account_summaries, load_trial_accounts,
    };

    fn window() -> DateRange {
        DateRange::new(date!(2025 - 01 - 01), date!(2025 - 01 - 30)).unwrap()
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &format!("{}/api/get-daily-req", server.uri()),
            &format!("{}/api/trial-monitor", server.uri()),
            Duration::from_secs(5),
            DataMode::Live,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_account_summaries_with_iso_dates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-daily-req"))
            .and(query_param("fromDate", "2025-01-01"))
            .and(query_param("toDate", "2025-01-30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "account_id": "a",
                    "name": "Account A",
                    "account_type": "STANDARD",
                    "metadata": { "contact": { "name": "A" }, "time_zone": "GMT+7" },
                    "valid_txn_cnt": 150.0,
                    "valid_txn_cnt_range_before": 100.0
                },
                {
                    "account_id": "b",
                    "name": "Account B",
                    "valid_txn_cnt": 10.0,
                    "valid_txn_cnt_range_before": 0.0
                }
            ])))
            .mount(&server)
            .await;

        let outcome = load_account_summaries(&client_for(&server), window()).await;

        assert_eq!(outcome.source, DataSource::Backend);
        assert_eq!(outcome.alert, None);
        assert_eq!(outcome.data.len(), 2);
        assert_eq!(outcome.data[0].diff, 50.0);
        assert_eq!(outcome.data[0].percentage, 50.0);
        assert_eq!(outcome.data[1].percentage, 0.0);
    }

    #[tokio::test]
    async fn account_summaries_fall_back_to_sample_data_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let outcome = load_account_summaries(&client_for(&server), window()).await;

        assert_eq!(outcome.source, DataSource::Sample);
        assert!(!outcome.data.is_empty());
        assert!(matches!(outcome.alert, Some(Alert::Error { .. })));
    }

    #[tokio::test]
    async fn reports_http_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch_account_summaries(window())
            .await;

        assert_eq!(result, Err(Error::HttpStatus(503)));
    }

    #[tokio::test]
    async fn reports_malformed_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch_account_summaries(window())
            .await;

        assert!(matches!(result, Err(Error::MalformedResponse(_))), "{result:?}");
    }

    #[tokio::test]
    async fn falls_back_when_backend_is_unreachable() {
        let client = ApiClient::new(
            "http://127.0.0.1:9/api/get-daily-req",
            "http://127.0.0.1:9/api/trial-monitor",
            Duration::from_secs(1),
            DataMode::Live,
        )
        .unwrap();

        let outcome = load_trial_accounts(&client, window(), 3, date!(2025 - 01 - 30)).await;

        assert_eq!(outcome.source, DataSource::Sample);
        assert!(outcome.alert.is_some());
        assert!(outcome.data.iter().all(|a| a.monthly_data.len() == 3));
    }

    #[tokio::test]
    async fn fetches_trial_accounts_and_drops_idle_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trial-monitor"))
            .and(query_param("account_type", "TRIAL"))
            .and(query_param("numberOfRangeRequests", "2"))
            .and(query_param("fromDate", "01-01-2025"))
            .and(query_param("toDate", "01-30-2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "account_id": "busy", "name": "Busy", "account_type": "TRIAL", "0": 5, "1": 0 },
                    { "account_id": "idle", "name": "Idle", "account_type": "TRIAL", "0": 0, "1": 0 }
                ],
                "rangeDates": [
                    { "fromDate": "2025-01-16", "toDate": "2025-01-30" },
                    { "fromDate": "2025-01-01", "toDate": "2025-01-15" }
                ]
            })))
            .mount(&server)
            .await;

        let outcome =
            load_trial_accounts(&client_for(&server), window(), 2, date!(2025 - 01 - 30)).await;

        assert_eq!(outcome.source, DataSource::Backend);
        assert_eq!(outcome.data.len(), 1);
        let counts: Vec<f64> = outcome.data[0]
            .monthly_data
            .iter()
            .map(|r| r.valid_txn_cnt)
            .collect();
        assert_eq!(counts, [0.0, 5.0]);
    }

    #[tokio::test]
    async fn sample_trial_accounts_are_stable_for_the_same_request() {
        let client = ApiClient::new(
            "http://localhost/unused",
            "http://localhost/unused",
            Duration::from_secs(1),
            DataMode::Sample,
        )
        .unwrap();
        let today = date!(2025 - 01 - 30);

        let first = load_trial_accounts(&client, window(), 3, today).await;
        let second = load_trial_accounts(&client, window(), 3, today).await;
        let other_window = load_trial_accounts(
            &client,
            DateRange::new(date!(2024 - 12 - 01), date!(2025 - 01 - 30)).unwrap(),
            3,
            today,
        )
        .await;

        assert_eq!(first, second);
        assert_ne!(first.data, other_window.data);
    }

    #[tokio::test]
    async fn sample_mode_skips_the_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = ApiClient::new(
            &server.uri(),
            &server.uri(),
            Duration::from_secs(1),
            DataMode::Sample,
        )
        .unwrap();

        let outcome = load_account_summaries(&client, window()).await;

        assert_eq!(outcome.source, DataSource::Sample);
        assert_eq!(outcome.alert, None);
    }
}
