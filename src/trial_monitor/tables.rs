//! The trial monitor table: one row per account and one column per range.

use maud::{Markup, html};

use crate::{
    format::format_number,
    html::{BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, truncate_text},
    trial::{AccountStatus, CountLevel, TrialAccount},
};

use super::query::TrialMonitorParams;

/// The account ID is cut to eight characters followed by "...".
const ID_DISPLAY_LENGTH: usize = 11;

/// The badge colors for each status.
pub(super) fn status_badge(status: AccountStatus) -> Markup {
    let color = match status {
        AccountStatus::Partner => "bg-blue-600 text-white",
        AccountStatus::Potential => "bg-gray-200 text-gray-900 dark:bg-gray-600 dark:text-white",
        AccountStatus::NeedsReview => "bg-red-600 text-white",
        AccountStatus::Normal => "border border-gray-300 text-gray-700 dark:text-gray-300",
    };

    html!(
        span class={(BADGE_STYLE) " " (color)} data-status=(status.as_query_value())
        {
            (status.label())
        }
    )
}

/// A link that replaces the trial monitor content.
pub(super) fn trial_monitor_link(url: &str, class: &str, content: Markup) -> Markup {
    html!(
        a
            href=(url)
            hx-get=(url)
            hx-target="#trial-monitor-content"
            hx-push-url="true"
            class=(class)
        {
            (content)
        }
    )
}

/// Renders the accounts with their status and the count of each range.
///
/// The range columns are labeled after the first account's ranges.
pub(super) fn trial_monitor_table(
    accounts: &[(TrialAccount, AccountStatus)],
    params: &TrialMonitorParams,
) -> Markup {
    let range_labels: Vec<&str> = accounts
        .first()
        .map(|(account, _)| {
            account
                .monthly_data
                .iter()
                .map(|range| range.label.as_str())
                .collect()
        })
        .unwrap_or_default();

    html!(
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table class="min-w-[800px] w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class="px-6 py-3 whitespace-nowrap" { "ID" }
                        th scope="col" class="px-6 py-3 whitespace-nowrap" { "Tên tài khoản" }
                        th scope="col" class="px-6 py-3 whitespace-nowrap" { "Loại tài khoản" }
                        th scope="col" class="px-6 py-3 whitespace-nowrap" { "Trạng thái" }

                        @for label in &range_labels {
                            th scope="col" class="px-6 py-3 whitespace-nowrap text-right" { (label) }
                        }
                    }
                }

                tbody
                {
                    @for (account, status) in accounts {
                        (account_row(account, *status, params))
                    }

                    @if accounts.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "Không có tài khoản nào phù hợp."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn account_row(account: &TrialAccount, status: AccountStatus, params: &TrialMonitorParams) -> Markup {
    let (short_id, full_id) = truncate_text(&account.account_id, ID_DISPLAY_LENGTH);
    let is_selected = params.selected.as_deref() == Some(account.account_id.as_str());
    let row_style = if is_selected {
        "bg-blue-50 border-b dark:bg-gray-700 dark:border-gray-600"
    } else {
        TABLE_ROW_STYLE
    };

    html!(
        tr class=(row_style) data-account-id=(account.account_id)
        {
            td class={(TABLE_CELL_STYLE) " font-mono text-xs"} title=[full_id] { (short_id) }
            td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (trial_monitor_link(
                    &params.with_selected(Some(&account.account_id)).url(),
                    "hover:underline",
                    html!((account.name)),
                ))
            }
            td class=(TABLE_CELL_STYLE) { (account.account_type) }
            td class=(TABLE_CELL_STYLE) { (status_badge(status)) }

            @for range in &account.monthly_data {
                td
                    class={"px-6 py-4 text-right whitespace-nowrap " (CountLevel::from_count(range.valid_txn_cnt).cell_class())}
                    data-range-count
                {
                    (format_number(range.valid_txn_cnt))
                }
            }
        }
    )
}
