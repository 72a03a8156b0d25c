//! Trial monitor data: request counts of accounts over consecutive date ranges
//! and the status derived from them.

mod activity;
mod core;
mod range;
mod sample;
mod status;

pub use activity::{CountLevel, filter_active_accounts};
pub use core::{TrialAccount, TrialMonitorResponse, build_trial_accounts};
pub use range::{
    DEFAULT_RANGE_COUNT, DateRange, MAX_RANGE_COUNT, RANGE_COUNT_OPTIONS, default_window,
    format_day_month_year, format_month_day_year, parse_date_or_warn, validate_range_count,
};
pub use sample::generate_sample_data;
pub use status::{AccountStatus, ClassificationThresholds, classify_account};

#[cfg(test)]
pub use core::RangeCount;
