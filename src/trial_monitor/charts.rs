use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType, ItemStyle},
    series::bar::Bar,
};

use crate::{
    dashboard::{CURRENT_COLOR, count_formatter, count_tooltip},
    trial::TrialAccount,
};

/// The count of each range of `account` as bars, oldest range first.
pub(super) fn range_counts_chart(account: &TrialAccount) -> Chart {
    let labels: Vec<&str> = account
        .monthly_data
        .iter()
        .map(|range| range.label.as_str())
        .collect();
    let counts: Vec<f64> = account
        .monthly_data
        .iter()
        .map(|range| range.valid_txn_cnt)
        .collect();

    Chart::new()
        .title(Title::new().text("Số giao dịch theo khoảng"))
        .tooltip(count_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(50)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(count_formatter())),
        )
        .series(
            Bar::new()
                .name("Số giao dịch")
                .item_style(ItemStyle::new().color(CURRENT_COLOR))
                .data(counts),
        )
}

#[cfg(test)]
mod tests {
    use crate::{
        account::AccountType,
        trial::{RangeCount, TrialAccount},
    };

    use super::range_counts_chart;

    #[test]
    fn chart_has_one_bar_per_range() {
        let account = TrialAccount {
            account_id: "a".to_owned(),
            name: "A".to_owned(),
            account_type: AccountType::Trial,
            metadata: None,
            monthly_data: ["Jan", "Feb"]
                .iter()
                .zip([120.0, 4_500.0])
                .map(|(label, count)| RangeCount {
                    label: (*label).to_owned(),
                    range: None,
                    valid_txn_cnt: count,
                })
                .collect(),
        };

        let options = range_counts_chart(&account).to_string();

        assert!(options.contains(r#""Jan""#), "{options}");
        assert!(options.contains(r#""Feb""#), "{options}");
        assert!(options.contains("4500"), "{options}");
    }
}
