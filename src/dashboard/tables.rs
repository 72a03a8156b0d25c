//! The sortable account summary table.

use maud::{Markup, html};

use crate::{
    account::AccountSummary,
    format::{format_number, format_percentage},
    html::{BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, change_class},
    view_state::{SortDirection, SortField},
};

use super::query::DashboardParams;

const SELECTED_ROW_STYLE: &str = "bg-blue-50 border-b dark:bg-gray-700 dark:border-gray-600";
const NUMBER_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";

/// The columns of the table, in display order.
const COLUMNS: [(SortField, &str); 5] = [
    (SortField::Name, "Tài khoản"),
    (SortField::ValidTxnCnt, "Giá trị hiện tại"),
    (SortField::ValidTxnCntRangeBefore, "Giá trị trước"),
    (SortField::Diff, "Chênh lệch"),
    (SortField::Percentage, "Phần trăm"),
];

/// Attributes shared by links that replace the dashboard content.
pub(super) fn dashboard_link(url: &str, class: &str, content: Markup) -> Markup {
    html!(
        a
            href=(url)
            hx-get=(url)
            hx-target="#dashboard-content"
            hx-push-url="true"
            class=(class)
        {
            (content)
        }
    )
}

fn sort_indicator(field: SortField, params: &DashboardParams) -> &'static str {
    if params.sort.field != field {
        return "↕";
    }

    match params.sort.direction {
        SortDirection::Asc => "↑",
        SortDirection::Desc => "↓",
    }
}

fn header_cell(field: SortField, title: &str, params: &DashboardParams) -> Markup {
    let is_active = params.sort.field == field;
    let align = if field == SortField::Name {
        "text-left"
    } else {
        "text-right"
    };

    html!(
        th
            scope="col"
            class={"px-6 py-3 " (align)}
            aria-sort=[is_active.then(|| match params.sort.direction {
                SortDirection::Asc => "ascending",
                SortDirection::Desc => "descending",
            })]
        {
            (dashboard_link(
                &params.with_sort(field).url(),
                "inline-flex items-center gap-1 hover:underline",
                html!(
                    (title)
                    span class=(if is_active { "text-blue-600" } else { "text-gray-400" })
                    {
                        (sort_indicator(field, params))
                    }
                ),
            ))
        }
    )
}

/// Renders the account table with links to sort by each column and to select
/// an account.
pub(super) fn account_table(
    accounts: &[AccountSummary],
    params: &DashboardParams,
    selected_id: Option<&str>,
) -> Markup {
    html!(
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for (field, title) in COLUMNS {
                            (header_cell(field, title, params))
                        }
                    }
                }

                tbody
                {
                    @for account in accounts {
                        (account_row(account, params, selected_id == Some(account.account_id.as_str())))
                    }

                    @if accounts.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(COLUMNS.len()) class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "Không tìm thấy tài khoản nào."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn account_row(account: &AccountSummary, params: &DashboardParams, is_selected: bool) -> Markup {
    let row_style = if is_selected {
        SELECTED_ROW_STYLE
    } else {
        TABLE_ROW_STYLE
    };

    html!(
        tr class=(row_style) data-account-id=(account.account_id)
        {
            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (dashboard_link(
                    &params.with_selected(&account.account_id).url(),
                    "hover:underline",
                    html!((account.name)),
                ))

                span class={(BADGE_STYLE) " ms-2 bg-gray-100 text-gray-700 dark:bg-gray-600 dark:text-gray-200"}
                {
                    (account.account_type)
                }
            }
            td class=(NUMBER_CELL_STYLE) { (format_number(account.valid_txn_cnt)) }
            td class=(NUMBER_CELL_STYLE) { (format_number(account.valid_txn_cnt_range_before)) }
            td class={(NUMBER_CELL_STYLE) " " (change_class(account.diff))}
            {
                (format_number(account.diff))
            }
            td class={(NUMBER_CELL_STYLE) " " (change_class(account.percentage))}
            {
                (format_percentage(account.percentage))
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        account::{AccountSummary, AccountSummaryRow, AccountType, sample_account_summaries},
        dashboard::query::{DashboardParams, DashboardQuery},
        view_state::SortField,
    };

    use super::account_table;

    fn params() -> DashboardParams {
        DashboardParams::from_query(DashboardQuery::default(), date!(2025 - 03 - 15))
    }

    #[test]
    fn renders_one_row_per_account() {
        let accounts = sample_account_summaries();

        let html = account_table(&accounts, &params(), None).into_string();
        let html = Html::parse_fragment(&html);

        let selector = Selector::parse("tbody tr[data-account-id]").unwrap();
        assert_eq!(html.select(&selector).count(), accounts.len());
    }

    #[test]
    fn marks_active_sort_column() {
        let html = account_table(&[], &params(), None).into_string();
        let html = Html::parse_fragment(&html);

        let selector = Selector::parse("th[aria-sort]").unwrap();
        let sorted: Vec<_> = html.select(&selector).collect();
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].value().attr("aria-sort"), Some("descending"));
        assert!(sorted[0].text().collect::<String>().contains("Chênh lệch"));
    }

    #[test]
    fn header_links_toggle_active_sort() {
        let params = params();
        let html = account_table(&[], &params, None).into_string();
        let html = Html::parse_fragment(&html);

        let selector = Selector::parse("thead a").unwrap();
        let links: Vec<&str> = html
            .select(&selector)
            .filter_map(|link| link.value().attr("href"))
            .collect();

        assert!(links.contains(&params.with_sort(SortField::Diff).url().as_str()));
        assert!(links.iter().any(|link| link.contains("sort=diff&direction=asc")));
        assert!(links.iter().any(|link| link.contains("sort=name&direction=desc")));
    }

    #[test]
    fn shows_empty_message() {
        let html = account_table(&[], &params(), None).into_string();

        assert!(html.contains("Không tìm thấy tài khoản nào."));
    }

    #[test]
    fn highlights_negative_diff() {
        let decreasing = AccountSummary::from(AccountSummaryRow {
            account_id: "a".to_owned(),
            name: "A".to_owned(),
            account_type: AccountType::Standard,
            metadata: Default::default(),
            valid_txn_cnt: 50.0,
            valid_txn_cnt_range_before: 100.0,
        });

        let html = account_table(&[decreasing], &params(), None).into_string();
        let html = Html::parse_fragment(&html);

        let selector = Selector::parse("td.text-red-600").unwrap();
        let cells: Vec<String> = html
            .select(&selector)
            .map(|cell| cell.text().collect::<String>())
            .collect();
        assert_eq!(cells, ["-50", "-50.00%"]);
    }
}
