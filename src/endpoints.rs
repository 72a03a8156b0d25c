//! The URIs of the pages served by the dashboard.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The account summary table, statistics and account details.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The request counts of trial accounts over several date ranges.
pub const TRIAL_MONITOR_VIEW: &str = "/trial-monitor";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRIAL_MONITOR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
    }
}
