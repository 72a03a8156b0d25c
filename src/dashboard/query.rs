//! The query string of the dashboard page and the links derived from it.

use serde::Deserialize;
use time::Date;

use crate::{
    account::AccountType,
    endpoints,
    statistics::{ChartMode, DEFAULT_SELECTED_TYPES},
    trial::{default_window, parse_date_or_warn},
    view_state::{CategoryFilter, SearchQuery, SortDirection, SortField, SortState},
};

/// The raw query parameters of the dashboard page.
///
/// `types` may be repeated, e.g. `types=TRIAL&types=STANDARD`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct DashboardQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
    #[serde(default)]
    pub types: Vec<AccountType>,
    pub chart: Option<ChartMode>,
    pub q: Option<String>,
    pub selected: Option<String>,
}

/// The dashboard's view state with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardParams {
    pub from: Date,
    pub to: Date,
    pub sort: SortState,
    pub types: CategoryFilter<AccountType>,
    pub chart: ChartMode,
    pub search: String,
    pub selected: Option<String>,
}

impl DashboardParams {
    /// Fill in the parameters missing from `query`.
    ///
    /// The window defaults to the last month up to `today`. Dates that cannot
    /// be parsed are treated as missing.
    pub fn from_query(query: DashboardQuery, today: Date) -> Self {
        let window = default_window(today);

        Self {
            from: parse_date_or_warn(query.from.as_deref(), "start").unwrap_or(window.from),
            to: parse_date_or_warn(query.to.as_deref(), "end").unwrap_or(window.to),
            sort: SortState {
                field: query.sort.unwrap_or_default(),
                direction: query.direction.unwrap_or_default(),
            },
            types: CategoryFilter::new(query.types),
            chart: query.chart.unwrap_or_default(),
            search: query.q.unwrap_or_default().trim().to_owned(),
            selected: query.selected.filter(|id| !id.is_empty()),
        }
    }

    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.search)
    }

    /// The account types included in the statistics summary.
    pub fn statistics_types(&self) -> Vec<AccountType> {
        if self.types.selected().is_empty() {
            DEFAULT_SELECTED_TYPES.to_vec()
        } else {
            self.types.selected().to_vec()
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
            ("sort", self.sort.field.as_query_value().to_owned()),
            ("direction", self.sort.direction.as_query_value().to_owned()),
            ("chart", self.chart.as_query_value().to_owned()),
        ];

        pairs.extend(
            self.types
                .selected()
                .iter()
                .map(|account_type| ("types", account_type.as_str().to_owned())),
        );

        if !self.search.is_empty() {
            pairs.push(("q", self.search.clone()));
        }

        if let Some(selected) = &self.selected {
            pairs.push(("selected", selected.clone()));
        }

        pairs
    }

    /// The link to the dashboard with these parameters.
    pub fn url(&self) -> String {
        match serde_urlencoded::to_string(self.query_pairs()) {
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
            Err(error) => {
                tracing::error!("Could not encode dashboard query parameters: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }

    /// The parameters as hidden form inputs, leaving out the fields the form
    /// itself sets.
    pub fn hidden_fields(&self, except: &[&str]) -> Vec<(&'static str, String)> {
        self.query_pairs()
            .into_iter()
            .filter(|(name, _)| !except.contains(name))
            .collect()
    }

    pub fn with_sort(&self, field: SortField) -> Self {
        Self {
            sort: self.sort.toggled(field),
            ..self.clone()
        }
    }

    pub fn with_toggled_type(&self, account_type: AccountType) -> Self {
        Self {
            types: CategoryFilter::new(self.types.toggled(account_type)),
            ..self.clone()
        }
    }

    pub fn with_chart(&self, chart: ChartMode) -> Self {
        Self {
            chart,
            ..self.clone()
        }
    }

    pub fn with_selected(&self, account_id: &str) -> Self {
        Self {
            selected: Some(account_id.to_owned()),
            ..self.clone()
        }
    }
}
