//! Account summaries: the transaction volume of each business account in the
//! selected period compared to the period before it.

mod core;
mod sample;

pub use core::{AccountSummary, AccountSummaryRow, AccountType, calculate_percentage};
pub use sample::sample_account_summaries;
