//! Dashboard module
//!
//! Provides the account summary page: a sortable and searchable table of
//! accounts with their period-over-period change, a detail view of the
//! selected account and a statistics summary over the selected account types.

mod cards;
mod charts;
mod handlers;
mod query;
mod tables;

pub(crate) use charts::{
    CURRENT_COLOR, DashboardChart, chart_container, charts_script, count_formatter, count_tooltip,
};
pub use handlers::get_dashboard_page;
