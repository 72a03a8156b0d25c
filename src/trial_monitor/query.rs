//! The query string of the trial monitor page and the links derived from it.

use serde::Deserialize;
use time::Date;

use crate::{
    endpoints,
    trial::{AccountStatus, DEFAULT_RANGE_COUNT, default_window, parse_date_or_warn},
    view_state::{CategoryFilter, SearchQuery},
};

/// The raw query parameters of the trial monitor page.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct TrialMonitorQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub range_count: Option<usize>,
    /// Set by the "load data" button and by links that need fresh data.
    #[serde(default)]
    pub load: bool,
    #[serde(default)]
    pub status: Vec<AccountStatus>,
    pub q: Option<String>,
    pub selected: Option<String>,
}

impl TrialMonitorQuery {
    /// Whether the page should fetch data.
    ///
    /// The first visit, without any parameters, loads the default window.
    /// After that data is only loaded when asked for.
    pub fn should_load(&self) -> bool {
        self.load || *self == Self::default()
    }
}

/// The trial monitor's view state with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TrialMonitorParams {
    pub from: Date,
    pub to: Date,
    pub range_count: usize,
    pub status: CategoryFilter<AccountStatus>,
    pub search: String,
    pub selected: Option<String>,
}

impl TrialMonitorParams {
    /// Fill in the parameters missing from `query`.
    ///
    /// Dates that cannot be parsed are treated as missing.
    pub fn from_query(query: TrialMonitorQuery, today: Date) -> Self {
        let window = default_window(today);

        Self {
            from: parse_date_or_warn(query.from.as_deref(), "start").unwrap_or(window.from),
            to: parse_date_or_warn(query.to.as_deref(), "end").unwrap_or(window.to),
            range_count: query.range_count.unwrap_or(DEFAULT_RANGE_COUNT),
            status: CategoryFilter::new(query.status),
            search: query.q.unwrap_or_default().trim().to_owned(),
            selected: query.selected.filter(|id| !id.is_empty()),
        }
    }

    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.search)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
            ("range_count", self.range_count.to_string()),
            ("load", "true".to_owned()),
        ];

        pairs.extend(
            self.status
                .selected()
                .iter()
                .map(|status| ("status", status.as_query_value().to_owned())),
        );

        if !self.search.is_empty() {
            pairs.push(("q", self.search.clone()));
        }

        if let Some(selected) = &self.selected {
            pairs.push(("selected", selected.clone()));
        }

        pairs
    }

    /// The link to the trial monitor with these parameters, loading the data.
    pub fn url(&self) -> String {
        match serde_urlencoded::to_string(self.query_pairs()) {
            Ok(query) => format!("{}?{query}", endpoints::TRIAL_MONITOR_VIEW),
            Err(error) => {
                tracing::error!("Could not encode trial monitor query parameters: {error}");
                endpoints::TRIAL_MONITOR_VIEW.to_owned()
            }
        }
    }

    /// The parameters as hidden form inputs, leaving out `except`.
    pub fn hidden_fields(&self, except: &[&str]) -> Vec<(&'static str, String)> {
        self.query_pairs()
            .into_iter()
            .filter(|(name, _)| !except.contains(name))
            .collect()
    }

    pub fn with_toggled_status(&self, status: AccountStatus) -> Self {
        Self {
            status: CategoryFilter::new(self.status.toggled(status)),
            ..self.clone()
        }
    }

    pub fn with_selected(&self, account_id: Option<&str>) -> Self {
        Self {
            selected: account_id.map(str::to_owned),
            ..self.clone()
        }
    }
}
