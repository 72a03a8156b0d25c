//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for the account summary:
//! - **Account Chart**: Previous, current and difference of the selected account
//! - **Overview Chart**: Current and previous totals of the selected account types
//! - **By Type Chart**: Share of the current total per account type
//! - **Comparison Chart**: Current and previous totals per selected account type
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::{DataPoint, DataPointItem},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::{Pie, bar::Bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    account::AccountSummary,
    statistics::{Totals, TypeTotals},
};

const PREVIOUS_COLOR: &str = "#94a3b8";
pub(crate) const CURRENT_COLOR: &str = "#3b82f6";
const INCREASE_COLOR: &str = "#22c55e";
const DECREASE_COLOR: &str = "#ef4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(crate) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a chart.
pub(crate) fn chart_container(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] w-full rounded dark:bg-gray-100"
        {}
    )
}

/// Generates the script that initializes the charts.
///
/// The script must come after the chart containers. It runs both on page load
/// and when htmx swaps in new content.
pub(crate) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(
        script { (PreEscaped(script_content)) }
    )
}

#[inline]
pub(crate) fn count_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const countFormatter = new Intl.NumberFormat('vi-VN', {
              maximumFractionDigits: 0
            });
            return (number) ? countFormatter.format(number) : \"0\";",
    )
}

/// Creates a tooltip configuration for transaction counts
pub(crate) fn count_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(count_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

fn bar_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(70)
        .contain_label(true)
}

fn colored_value(value: f64, color: &str) -> DataPoint {
    DataPointItem::new(value)
        .item_style(ItemStyle::new().color(color))
        .into()
}

/// The previous, current and difference of `account` as colored bars.
pub(super) fn account_chart(account: &AccountSummary) -> Chart {
    let diff_color = if account.diff > 0.0 {
        INCREASE_COLOR
    } else {
        DECREASE_COLOR
    };

    Chart::new()
        .title(Title::new().text(account.name.as_str()).subtext("Số giao dịch"))
        .tooltip(count_tooltip())
        .grid(bar_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(vec!["Giá trị trước", "Giá trị hiện tại", "Chênh lệch"]),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(count_formatter())),
        )
        .series(Bar::new().name("Giá trị").data(vec![
            colored_value(account.valid_txn_cnt_range_before, PREVIOUS_COLOR),
            colored_value(account.valid_txn_cnt, CURRENT_COLOR),
            colored_value(account.diff, diff_color),
        ]))
}

pub(super) fn overview_chart(totals: &Totals) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Tổng quan")
                .subtext("Các loại tài khoản đã chọn"),
        )
        .tooltip(count_tooltip())
        .grid(bar_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(vec!["Hiện tại", "Trước đó"]),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(count_formatter())),
        )
        .series(
            Bar::new()
                .name("Số giao dịch")
                .data(vec![totals.current, totals.previous]),
        )
}

pub(super) fn by_type_chart(by_type: &[TypeTotals]) -> Chart {
    let data: Vec<DataPointItem> = by_type
        .iter()
        .map(|totals| {
            DataPointItem::new(totals.current)
                .name(totals.account_type.as_str())
                .item_style(ItemStyle::new().color(totals.account_type.color()))
        })
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Theo loại")
                .subtext("Số giao dịch hiện tại theo loại tài khoản"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(count_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Số giao dịch")
                .radius("70%")
                .data(data),
        )
}

pub(super) fn comparison_chart(comparison: &[TypeTotals]) -> Chart {
    let labels: Vec<&str> = comparison
        .iter()
        .map(|totals| totals.account_type.as_str())
        .collect();
    let current: Vec<f64> = comparison.iter().map(|totals| totals.current).collect();
    let previous: Vec<f64> = comparison.iter().map(|totals| totals.previous).collect();

    Chart::new()
        .title(
            Title::new()
                .text("So sánh")
                .subtext("Hiện tại và trước đó theo loại tài khoản"),
        )
        .tooltip(count_tooltip())
        .legend(Legend::new().right("4%").top("1%"))
        .grid(bar_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(count_formatter())),
        )
        .series(
            Bar::new()
                .name("Hiện tại")
                .item_style(ItemStyle::new().color(CURRENT_COLOR))
                .data(current),
        )
        .series(
            Bar::new()
                .name("Trước đó")
                .item_style(ItemStyle::new().color(PREVIOUS_COLOR))
                .data(previous),
        )
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::{
        account::{AccountSummary, AccountType},
        statistics::TypeTotals,
    };

    use super::{DashboardChart, account_chart, by_type_chart, charts_script};

    fn account(diff: f64) -> AccountSummary {
        AccountSummary {
            account_id: "a".to_owned(),
            name: "FUTA BUS LINES".to_owned(),
            account_type: AccountType::Trial,
            metadata: Default::default(),
            valid_txn_cnt: 100.0 + diff,
            valid_txn_cnt_range_before: 100.0,
            diff,
            percentage: 0.0,
        }
    }

    #[test]
    fn account_chart_colors_decrease_red() {
        let options = account_chart(&account(-20.0)).to_string();

        assert!(options.contains("#ef4444"), "{options}");
        assert!(!options.contains("#22c55e"), "{options}");
        assert!(options.contains("FUTA BUS LINES"));
    }

    #[test]
    fn account_chart_colors_increase_green() {
        let options = account_chart(&account(20.0)).to_string();

        assert!(options.contains("#22c55e"), "{options}");
    }

    #[test]
    fn by_type_chart_uses_account_type_colors() {
        let options = by_type_chart(&[TypeTotals {
            account_type: AccountType::Enterprise,
            current: 10.0,
            previous: 5.0,
        }])
        .to_string();

        assert!(options.contains("ENTERPRISE"));
        assert!(options.contains(AccountType::Enterprise.color()));
    }

    #[test]
    fn script_initializes_each_chart() {
        let charts = [
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let script = charts_script(&charts).into_string();

        let html = Html::parse_fragment(&script);
        assert!(html.errors.is_empty(), "{:?}", html.errors);
        assert!(script.contains(r#"getElementById("first-chart")"#));
        assert!(script.contains(r#"getElementById("second-chart")"#));
    }
}
