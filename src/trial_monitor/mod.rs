//! Trial monitor module
//!
//! Tracks the request counts of accounts across consecutive ranges of a
//! window and flags the accounts that need a review or look like partners.

mod charts;
mod handlers;
mod query;
mod tables;

pub use handlers::get_trial_monitor_page;
