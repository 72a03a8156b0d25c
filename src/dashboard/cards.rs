//! Cards for the statistics summary and the selected account.

use maud::{Markup, html};

use crate::{
    account::AccountSummary,
    format::{format_number, format_percentage, format_rounded_percentage},
    html::{CARD_STYLE, change_class},
    statistics::Totals,
};

fn value_card(title: &str, value: &str, value_class: &str) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (title) }
            p class={"text-2xl font-bold " (value_class)} data-card-value { (value) }
        }
    )
}

/// The totals of the selected account types.
pub(super) fn statistics_cards(totals: &Totals) -> Markup {
    html!(
        div class="grid grid-cols-2 lg:grid-cols-4 gap-4 w-full"
        {
            (value_card("Hiện tại", &format_number(totals.current), ""))
            (value_card("Trước đó", &format_number(totals.previous), ""))
            (value_card("Chênh lệch", &format_number(totals.diff), change_class(totals.diff)))
            (value_card(
                "Tỉ lệ thay đổi",
                &format_rounded_percentage(totals.percentage),
                change_class(totals.percentage),
            ))
        }
    )
}

/// The contact details and counts of the selected account.
pub(super) fn account_detail_cards(account: &AccountSummary) -> Markup {
    let contact = &account.metadata.contact;
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_owned());

    html!(
        div class="flex flex-col gap-4 w-full" id="account-detail"
        {
            div class=(CARD_STYLE)
            {
                h3 class="text-lg font-semibold mb-2" { (account.name) }
                p class="text-xs text-gray-500 dark:text-gray-400 mb-3" { (account.account_id) }

                dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 text-sm"
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Loại" }
                    dd { (account.account_type) }
                    dt class="text-gray-500 dark:text-gray-400" { "Liên hệ" }
                    dd { (or_dash(&contact.name)) }
                    dt class="text-gray-500 dark:text-gray-400" { "Email" }
                    dd { (or_dash(&contact.email)) }
                    dt class="text-gray-500 dark:text-gray-400" { "Điện thoại" }
                    dd { (or_dash(&contact.phone)) }

                    @if !account.metadata.time_zone.is_empty() {
                        dt class="text-gray-500 dark:text-gray-400" { "Múi giờ" }
                        dd { (account.metadata.time_zone) }
                    }
                }
            }

            div class="grid grid-cols-3 gap-4"
            {
                (value_card("Hiện tại", &format_number(account.valid_txn_cnt), ""))
                (value_card("Trước đó", &format_number(account.valid_txn_cnt_range_before), ""))
                (value_card(
                    "Phần trăm",
                    &format_percentage(account.percentage),
                    change_class(account.percentage),
                ))
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::{
        account::sample_account_summaries,
        statistics::Totals,
        test_utils::{assert_valid_html, select_texts},
    };

    use super::{account_detail_cards, statistics_cards};

    #[test]
    fn statistics_cards_show_formatted_totals() {
        let totals = Totals {
            current: 1_126.0,
            previous: 1_000.0,
            diff: 126.0,
            percentage: 12.6,
        };

        let html = Html::parse_fragment(&statistics_cards(&totals).into_string());

        assert_eq!(
            select_texts(&html, "[data-card-value]"),
            ["1.126", "1.000", "126", "13%"]
        );
    }

    #[test]
    fn detail_cards_show_contact() {
        let account = &sample_account_summaries()[1];

        let html = Html::parse_fragment(&account_detail_cards(account).into_string());

        assert_valid_html(&html);
        assert_eq!(
            select_texts(&html, "dd"),
            ["ENTERPRISE", "-", "haint46@vpbank.com.vn", "-", "GMT+7"]
        );
    }
}
