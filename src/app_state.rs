//! Implements a struct that holds the state of the web server.

use crate::{api::ApiClient, trial::ClassificationThresholds};

/// The settings that control how the dashboard presents data.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Ho_Chi_Minh".
    pub local_timezone: String,

    /// The limits used to classify trial monitor accounts.
    pub thresholds: ClassificationThresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            local_timezone: "Asia/Ho_Chi_Minh".to_owned(),
            thresholds: ClassificationThresholds::default(),
        }
    }
}

/// The state of the web server.
///
/// Nothing in here changes after start up, so every request gets a cheap clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the analytics backend.
    pub api_client: ApiClient,

    /// How the pages are presented.
    pub config: DashboardConfig,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `config.local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Asia/Ho_Chi_Minh". An invalid name is reported when a page is requested.
    pub fn new(api_client: ApiClient, config: DashboardConfig) -> Self {
        Self { api_client, config }
    }
}
