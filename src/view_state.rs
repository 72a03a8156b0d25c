//! Sorting, filtering and search state for the account tables.
//!
//! The state lives in the page's query string, so every change is a link to
//! the same page with different query parameters.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::{account::AccountSummary, format::normalize_search_text};

/// The column the account table is sorted by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    ValidTxnCnt,
    ValidTxnCntRangeBefore,
    #[default]
    Diff,
    Percentage,
}

impl SortField {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::ValidTxnCnt => "valid_txn_cnt",
            SortField::ValidTxnCntRangeBefore => "valid_txn_cnt_range_before",
            SortField::Diff => "diff",
            SortField::Percentage => "percentage",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// How the account table is sorted. Defaults to the largest increase first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// The sort state after the user clicks the header of `field`.
    ///
    /// Clicking the active column flips the direction, clicking another
    /// column sorts it in descending order.
    pub fn toggled(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Desc,
            }
        }
    }
}

fn compare_by_field(a: &AccountSummary, b: &AccountSummary, field: SortField) -> Ordering {
    match field {
        SortField::Name => normalize_search_text(&a.name).cmp(&normalize_search_text(&b.name)),
        SortField::ValidTxnCnt => a.valid_txn_cnt.total_cmp(&b.valid_txn_cnt),
        SortField::ValidTxnCntRangeBefore => a
            .valid_txn_cnt_range_before
            .total_cmp(&b.valid_txn_cnt_range_before),
        SortField::Diff => a.diff.total_cmp(&b.diff),
        SortField::Percentage => a.percentage.total_cmp(&b.percentage),
    }
}

/// Sort `accounts` in place.
///
/// The sort is stable: accounts with equal values keep their relative order
/// in both directions.
pub fn sort_accounts(accounts: &mut [AccountSummary], sort: SortState) {
    accounts.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, sort.field);

        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// A multi-select filter over categories such as account types or statuses.
///
/// Nothing selected means everything is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter<T> {
    selected: Vec<T>,
}

impl<T: Copy + PartialEq> CategoryFilter<T> {
    /// Create a filter from the selected categories, dropping duplicates.
    pub fn new(selected: Vec<T>) -> Self {
        let mut unique = Vec::with_capacity(selected.len());

        for category in selected {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }

        Self { selected: unique }
    }

    pub fn selected(&self) -> &[T] {
        &self.selected
    }

    pub fn is_selected(&self, category: T) -> bool {
        self.selected.contains(&category)
    }

    /// Whether an item of `category` passes the filter.
    pub fn matches(&self, category: T) -> bool {
        self.selected.is_empty() || self.is_selected(category)
    }

    /// The selection after the user clicks `category`: it is removed if it
    /// was selected and added otherwise.
    pub fn toggled(&self, category: T) -> Vec<T> {
        if self.is_selected(category) {
            self.selected
                .iter()
                .copied()
                .filter(|&selected| selected != category)
                .collect()
        } else {
            let mut selected = self.selected.clone();
            selected.push(category);
            selected
        }
    }
}

/// A free text search over account names and IDs that ignores case and
/// Vietnamese diacritics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    normalized: String,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        Self {
            normalized: normalize_search_text(query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whether an account with `name` and `account_id` matches. An empty query
    /// matches everything.
    pub fn matches(&self, name: &str, account_id: &str) -> bool {
        self.is_empty()
            || normalize_search_text(name).contains(&self.normalized)
            || account_id.to_lowercase().contains(&self.normalized)
    }
}
