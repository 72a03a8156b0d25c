//! The trial monitor page: request counts of accounts over consecutive ranges
//! of the chosen window, with the status derived from them.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::{Alert, alert_container},
    api::{ApiClient, DataSource, load_trial_accounts},
    dashboard::{DashboardChart, chart_container, charts_script},
    endpoints,
    format::format_number,
    html::{
        BADGE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, CHIP_SELECTED_STYLE, CHIP_STYLE,
        ECHARTS_SCRIPT, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, base,
        loading_spinner,
    },
    navigation::NavBar,
    timezone::current_local_date,
    trial::{
        AccountStatus, ClassificationThresholds, CountLevel, DateRange, RANGE_COUNT_OPTIONS,
        TrialAccount, classify_account, format_day_month_year, validate_range_count,
    },
};

use super::{
    charts::range_counts_chart,
    query::{TrialMonitorParams, TrialMonitorQuery},
    tables::{status_badge, trial_monitor_link, trial_monitor_table},
};

const RANGE_CHART_ID: &str = "range-chart";

/// The state needed for displaying the trial monitor.
#[derive(Debug, Clone)]
pub struct TrialMonitorState {
    pub api_client: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Ho_Chi_Minh".
    pub local_timezone: String,
    pub thresholds: ClassificationThresholds,
}

impl FromRef<AppState> for TrialMonitorState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            local_timezone: state.config.local_timezone.clone(),
            thresholds: state.config.thresholds,
        }
    }
}

struct TrialMonitorData {
    /// The classified accounts that pass the status filter and search.
    rows: Vec<(TrialAccount, AccountStatus)>,
    /// The number of active accounts before filtering.
    account_count: usize,
    source: DataSource,
    selected: Option<(TrialAccount, AccountStatus)>,
    chart: Option<DashboardChart>,
}

/// Display the trial monitor.
///
/// Data is fetched on the first visit and whenever `load` is set. Otherwise
/// the page asks the user to load the data for the chosen window.
///
/// # Errors
/// Returns an error if the configured timezone is invalid.
pub async fn get_trial_monitor_page(
    State(state): State<TrialMonitorState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<TrialMonitorQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let should_load = query.should_load();
    let is_explicit_load = query.load;
    let params = TrialMonitorParams::from_query(query, today);

    let validated = DateRange::new(params.from, params.to).and_then(|window| {
        validate_range_count(params.range_count).map(|range_count| (window, range_count))
    });

    let (window, range_count) = match validated {
        Ok(validated) => validated,
        Err(error) => {
            tracing::warn!("Rejected trial monitor request: {error}");
            let markup = render(&params, None, vec![error.into_alert()], is_htmx_request);
            return Ok((StatusCode::BAD_REQUEST, markup).into_response());
        }
    };

    if !should_load {
        return Ok(render(&params, None, Vec::new(), is_htmx_request).into_response());
    }

    let outcome = load_trial_accounts(&state.api_client, window, range_count, today).await;
    let alert = match outcome.alert {
        Some(alert) => Some(alert),
        None if is_explicit_load => Some(loaded_alert(&params)),
        None => None,
    };
    let data = build_trial_monitor_data(outcome.data, outcome.source, &params, &state.thresholds);

    Ok(render(&params, Some(&data), alert.into_iter().collect(), is_htmx_request).into_response())
}

fn loaded_alert(params: &TrialMonitorParams) -> Alert {
    Alert::Success {
        message: "Đã tải dữ liệu".to_owned(),
        details: format!(
            "Dữ liệu từ ngày {} đến ngày {} với {} khoảng đã được cập nhật.",
            format_day_month_year(params.from),
            format_day_month_year(params.to),
            params.range_count
        ),
    }
}

fn build_trial_monitor_data(
    accounts: Vec<TrialAccount>,
    source: DataSource,
    params: &TrialMonitorParams,
    thresholds: &ClassificationThresholds,
) -> TrialMonitorData {
    let account_count = accounts.len();
    let search = params.search_query();

    let classified: Vec<(TrialAccount, AccountStatus)> = accounts
        .into_iter()
        .map(|account| {
            let status = classify_account(&account, thresholds);
            (account, status)
        })
        .collect();

    let selected = params.selected.as_deref().and_then(|id| {
        classified
            .iter()
            .find(|(account, _)| account.account_id == id)
            .cloned()
    });

    let rows = classified
        .into_iter()
        .filter(|(_, status)| params.status.matches(*status))
        .filter(|(account, _)| search.matches(&account.name, &account.account_id))
        .collect();

    let chart = selected.as_ref().map(|(account, _)| DashboardChart {
        id: RANGE_CHART_ID,
        options: range_counts_chart(account).to_string(),
    });

    TrialMonitorData {
        rows,
        account_count,
        source,
        selected,
        chart,
    }
}

fn render(
    params: &TrialMonitorParams,
    data: Option<&TrialMonitorData>,
    alerts: Vec<Alert>,
    is_htmx_request: bool,
) -> Markup {
    if is_htmx_request {
        html!(
            (trial_monitor_content(params, data))
            (alert_container(alerts, true))
        )
    } else {
        trial_monitor_view(NavBar::new(endpoints::TRIAL_MONITOR_VIEW), params, data, alerts)
    }
}

fn trial_monitor_view(
    nav_bar: NavBar<'_>,
    params: &TrialMonitorParams,
    data: Option<&TrialMonitorData>,
    alerts: Vec<Alert>,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="trial-monitor-content"
            class="flex flex-col gap-6 px-2 lg:px-6 py-4 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (trial_monitor_content(params, data))
        }

        (alert_container(alerts, false))
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    base("Theo dõi dùng thử", &scripts, &content)
}

fn trial_monitor_content(params: &TrialMonitorParams, data: Option<&TrialMonitorData>) -> Markup {
    html!(
        div
        {
            div class="flex flex-wrap items-center gap-2"
            {
                h2 class="text-2xl font-bold tracking-tight" { "TRIAL MONITOR" }

                @if let Some(data) = data {
                    @if data.source == DataSource::Sample {
                        span
                            class={(BADGE_STYLE) " bg-yellow-100 text-yellow-800 dark:bg-yellow-900 dark:text-yellow-300"}
                            data-source="sample"
                        {
                            "Dữ liệu mẫu"
                        }
                    }
                }
            }

            p class="text-sm text-gray-500 dark:text-gray-400 mt-1"
            {
                "Theo dõi tài khoản trial từ " (format_day_month_year(params.from))
                " đến " (format_day_month_year(params.to))
                " với " (params.range_count) " khoảng thời gian"
            }
        }

        (load_form(params))

        @match data {
            Some(data) => {
                (status_filter(params))
                (accounts_section(params, data))

                @if let Some(chart) = &data.chart {
                    (charts_script(std::slice::from_ref(chart)))
                }
            }
            None => {
                div class={(CARD_STYLE) " text-center py-8 text-gray-500 dark:text-gray-400"} id="load-prompt"
                {
                    "Nhấn \"Tải dữ liệu\" để xem danh sách tài khoản"
                }
            }
        }
    )
}

fn load_form(params: &TrialMonitorParams) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::TRIAL_MONITOR_VIEW)
            hx-get=(endpoints::TRIAL_MONITOR_VIEW)
            hx-target="#trial-monitor-content"
            hx-push-url="true"
            hx-indicator="#indicator"
            class="grid grid-cols-1 md:grid-cols-5 gap-4 items-end w-full"
        {
            @for (name, value) in params.hidden_fields(&["from", "to", "range_count", "load", "selected"]) {
                input type="hidden" name=(name) value=(value);
            }

            div
            {
                label for="from" class=(FORM_LABEL_STYLE) { "Từ ngày" }
                input
                    type="date"
                    id="from"
                    name="from"
                    value=(params.from)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="to" class=(FORM_LABEL_STYLE) { "Đến ngày" }
                input
                    type="date"
                    id="to"
                    name="to"
                    value=(params.to)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="range_count" class=(FORM_LABEL_STYLE) { "Số lượng khoảng" }
                select id="range_count" name="range_count" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for count in RANGE_COUNT_OPTIONS {
                        option value=(count) selected[count == params.range_count]
                        {
                            (count) " khoảng"
                        }
                    }
                }
            }

            div
            {
                label for="q" class=(FORM_LABEL_STYLE) { "Tìm kiếm" }
                input
                    type="search"
                    id="q"
                    name="q"
                    value=(params.search)
                    placeholder="Tên hoặc ID tài khoản"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" name="load" value="true" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                "Tải dữ liệu"
            }
        }
    )
}

fn status_filter(params: &TrialMonitorParams) -> Markup {
    html!(
        div class="flex flex-wrap items-center gap-2 w-full" id="status-filter"
        {
            span class="text-sm text-gray-500 dark:text-gray-400" { "Trạng thái:" }

            @for status in AccountStatus::ALL {
                @let style = if params.status.is_selected(status) {
                    CHIP_SELECTED_STYLE
                } else {
                    CHIP_STYLE
                };

                (trial_monitor_link(
                    &params.with_toggled_status(status).url(),
                    style,
                    html!((status.label())),
                ))
            }
        }
    )
}

fn accounts_section(params: &TrialMonitorParams, data: &TrialMonitorData) -> Markup {
    html!(
        section id="accounts" class="flex flex-col gap-4 w-full"
        {
            div class="flex flex-wrap items-baseline justify-between gap-2"
            {
                h3 class="text-xl font-semibold" { "Theo dõi tài khoản Trial" }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Hiển thị " (data.rows.len()) " / " (data.account_count) " tài khoản"
                }
            }

            (trial_monitor_table(&data.rows, params))

            @if let Some((account, status)) = &data.selected {
                (account_detail(account, *status, params, data.chart.as_ref()))
            }
        }
    )
}

fn account_detail(
    account: &TrialAccount,
    status: AccountStatus,
    params: &TrialMonitorParams,
    chart: Option<&DashboardChart>,
) -> Markup {
    let metadata = account.metadata.clone().unwrap_or_default();
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_owned());

    html!(
        div id="account-detail" class={(CARD_STYLE) " flex flex-col gap-4"}
        {
            div class="flex flex-wrap items-start justify-between gap-2"
            {
                div
                {
                    h3 class="text-lg font-semibold" { (account.name) }
                    p class="text-xs font-mono text-gray-500 dark:text-gray-400" { (account.account_id) }
                }

                div class="flex items-center gap-2"
                {
                    (status_badge(status))
                    (trial_monitor_link(
                        &params.with_selected(None).url(),
                        "text-sm text-gray-500 hover:underline",
                        html!("Đóng"),
                    ))
                }
            }

            dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 text-sm"
            {
                dt class="text-gray-500 dark:text-gray-400" { "Loại" }
                dd { (account.account_type) }
                dt class="text-gray-500 dark:text-gray-400" { "Liên hệ" }
                dd { (or_dash(metadata.contact_name)) }
                dt class="text-gray-500 dark:text-gray-400" { "Email" }
                dd { (or_dash(metadata.email)) }
                dt class="text-gray-500 dark:text-gray-400" { "Điện thoại" }
                dd { (or_dash(metadata.phone)) }
                dt class="text-gray-500 dark:text-gray-400" { "Tổng giao dịch" }
                dd { (format_number(account.total_volume())) }
            }

            div class="flex flex-wrap gap-2" id="range-badges"
            {
                @for range in &account.monthly_data {
                    span
                        class={(BADGE_STYLE) " " (CountLevel::from_count(range.valid_txn_cnt).badge_class())}
                    {
                        (range.label) ": " (format_number(range.valid_txn_cnt))
                    }
                }
            }

            @if let Some(chart) = chart {
                (chart_container(chart))
            }
        }
    )
}
