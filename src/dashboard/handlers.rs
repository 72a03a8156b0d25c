//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for the dashboard page and its htmx partial updates
//! - HTML view functions for rendering the dashboard UI
//! - The state used by the handler

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
    account::{AccountSummary, AccountType},
    alert::{Alert, alert_container},
    api::{ApiClient, DataSource, load_account_summaries},
    dashboard::{
        cards::{account_detail_cards, statistics_cards},
        charts::{
            DashboardChart, account_chart, by_type_chart, chart_container, charts_script,
            comparison_chart, overview_chart,
        },
        query::{DashboardParams, DashboardQuery},
        tables::{account_table, dashboard_link},
    },
    endpoints,
    html::{
        BADGE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, CHIP_SELECTED_STYLE, CHIP_STYLE,
        ECHARTS_SCRIPT, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, base,
        loading_spinner,
    },
    navigation::NavBar,
    statistics::{ChartMode, Totals, calculate_totals, comparison_totals, totals_by_type},
    timezone::current_local_date,
    trial::DateRange,
    view_state::sort_accounts,
};

const ACCOUNT_CHART_ID: &str = "account-chart";
const STATISTICS_CHART_ID: &str = "statistics-chart";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for the analytics backend.
    pub api_client: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Ho_Chi_Minh".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            local_timezone: state.config.local_timezone.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    /// The accounts that pass the type filter and search, sorted.
    rows: Vec<AccountSummary>,
    /// The number of accounts before filtering.
    account_count: usize,
    source: DataSource,
    selected: Option<AccountSummary>,
    totals: Totals,
    charts: Vec<DashboardChart>,
}

/// Display the account summary for the requested window.
///
/// htmx requests only get the page content and the alerts, everything else
/// gets the full page.
///
/// # Errors
/// Returns an error if the configured timezone is invalid.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let params = DashboardParams::from_query(query, today);

    let window = match DateRange::new(params.from, params.to) {
        Ok(window) => window,
        Err(error) => {
            tracing::warn!("Rejected dashboard request: {error}");
            let markup = render(&params, None, vec![error.into_alert()], is_htmx_request);
            return Ok((StatusCode::BAD_REQUEST, markup).into_response());
        }
    };

    let outcome = load_account_summaries(&state.api_client, window).await;
    let data = build_dashboard_data(outcome.data, outcome.source, &params);
    let alerts: Vec<Alert> = outcome.alert.into_iter().collect();

    Ok(render(&params, Some(&data), alerts, is_htmx_request).into_response())
}

fn render(
    params: &DashboardParams,
    data: Option<&DashboardData>,
    alerts: Vec<Alert>,
    is_htmx_request: bool,
) -> Markup {
    if is_htmx_request {
        dashboard_content_partial(params, data, alerts)
    } else {
        dashboard_view(NavBar::new(endpoints::DASHBOARD_VIEW), params, data, alerts)
    }
}

/// Applies the view state to the fetched accounts and builds the charts.
fn build_dashboard_data(
    accounts: Vec<AccountSummary>,
    source: DataSource,
    params: &DashboardParams,
) -> DashboardData {
    let statistics_types = params.statistics_types();
    let totals = calculate_totals(&accounts, &statistics_types);

    let statistics_chart = match params.chart {
        ChartMode::Overview => overview_chart(&totals),
        ChartMode::ByType => by_type_chart(&totals_by_type(&accounts)),
        ChartMode::Comparison => comparison_chart(&comparison_totals(&accounts, &statistics_types)),
    };

    let search = params.search_query();
    let mut rows: Vec<AccountSummary> = accounts
        .iter()
        .filter(|account| params.types.matches(account.account_type))
        .filter(|account| search.matches(&account.name, &account.account_id))
        .cloned()
        .collect();
    sort_accounts(&mut rows, params.sort);

    let selected = params
        .selected
        .as_deref()
        .and_then(|id| accounts.iter().find(|account| account.account_id == id))
        .or_else(|| rows.first())
        .cloned();

    let mut charts = vec![DashboardChart {
        id: STATISTICS_CHART_ID,
        options: statistics_chart.to_string(),
    }];

    if let Some(account) = &selected {
        charts.push(DashboardChart {
            id: ACCOUNT_CHART_ID,
            options: account_chart(account).to_string(),
        });
    }

    DashboardData {
        rows,
        account_count: accounts.len(),
        source,
        selected,
        totals,
        charts,
    }
}

/// Renders the full dashboard page.
fn dashboard_view(
    nav_bar: NavBar<'_>,
    params: &DashboardParams,
    data: Option<&DashboardData>,
    alerts: Vec<Alert>,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center gap-6 px-2 lg:px-6 py-4 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (dashboard_content(params, data))
        }

        (alert_container(alerts, false))
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    base("Tổng quan", &scripts, &content)
}

/// Renders the dashboard content for htmx updates.
///
/// The alerts replace the alert container already on the page.
fn dashboard_content_partial(
    params: &DashboardParams,
    data: Option<&DashboardData>,
    alerts: Vec<Alert>,
) -> Markup {
    html!(
        (dashboard_content(params, data))
        (alert_container(alerts, true))
    )
}

fn dashboard_content(params: &DashboardParams, data: Option<&DashboardData>) -> Markup {
    html!(
        div class="flex flex-wrap items-center justify-between w-full gap-2"
        {
            h2 class="text-2xl font-bold" { "Tổng quan giao dịch" }

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

        (filter_form(params))
        (type_filter(params))

        @match data {
            Some(data) => {
                (statistics_section(params, data))
                (accounts_section(params, data))
                (charts_script(&data.charts))
            }
            None => {
                div class={(CARD_STYLE) " text-center"} id="no-data"
                {
                    p { "Không có dữ liệu để hiển thị. Hãy chọn khoảng thời gian hợp lệ." }
                }
            }
        }
    )
}

fn filter_form(params: &DashboardParams) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-target="#dashboard-content"
            hx-push-url="true"
            hx-indicator="#indicator"
            class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end w-full"
        {
            @for (name, value) in params.hidden_fields(&["from", "to", "q", "selected"]) {
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
                label for="q" class=(FORM_LABEL_STYLE) { "Tìm kiếm" }
                input
                    type="search"
                    id="q"
                    name="q"
                    value=(params.search)
                    placeholder="Tên hoặc ID tài khoản"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                "Áp dụng"
            }
        }
    )
}

fn type_filter(params: &DashboardParams) -> Markup {
    html!(
        div class="flex flex-wrap items-center gap-2 w-full" id="type-filter"
        {
            span class="text-sm text-gray-500 dark:text-gray-400" { "Loại tài khoản:" }

            @for account_type in AccountType::GROUPED {
                @let style = if params.types.is_selected(account_type) {
                    CHIP_SELECTED_STYLE
                } else {
                    CHIP_STYLE
                };

                (dashboard_link(
                    &params.with_toggled_type(account_type).url(),
                    style,
                    html!((account_type)),
                ))
            }
        }
    )
}

fn statistics_section(params: &DashboardParams, data: &DashboardData) -> Markup {
    let statistics_types = params
        .statistics_types()
        .iter()
        .map(|account_type| account_type.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    html!(
        section id="statistics" class="flex flex-col gap-4 w-full"
        {
            div class="flex flex-wrap items-baseline justify-between gap-2"
            {
                h3 class="text-xl font-semibold" { "Thống kê" }
                p class="text-sm text-gray-500 dark:text-gray-400" { (statistics_types) }
            }

            (statistics_cards(&data.totals))

            div class="flex gap-2" role="tablist"
            {
                @for mode in ChartMode::ALL {
                    @let style = if mode == params.chart {
                        CHIP_SELECTED_STYLE
                    } else {
                        CHIP_STYLE
                    };

                    (dashboard_link(&params.with_chart(mode).url(), style, html!((mode.label()))))
                }
            }

            @for chart in data.charts.iter().filter(|chart| chart.id == STATISTICS_CHART_ID) {
                (chart_container(chart))
            }
        }
    )
}

fn accounts_section(params: &DashboardParams, data: &DashboardData) -> Markup {
    let selected_id = data
        .selected
        .as_ref()
        .map(|account| account.account_id.as_str());

    html!(
        section id="accounts" class="grid grid-cols-1 xl:grid-cols-3 gap-4 w-full"
        {
            div class="xl:col-span-2 flex flex-col gap-2"
            {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Hiển thị " (data.rows.len()) " / " (data.account_count) " tài khoản"
                }

                (account_table(&data.rows, params, selected_id))
            }

            @if let Some(account) = &data.selected {
                div class="flex flex-col gap-4"
                {
                    (account_detail_cards(account))

                    @for chart in data.charts.iter().filter(|chart| chart.id == ACCOUNT_CHART_ID) {
                        (chart_container(chart))
                    }
                }
            }
        }
    )
}
