use std::{net::SocketAddr, process::ExitCode, time::Duration};

use axum_server::Handle;
use clap::Parser;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use txn_dashboard::{
    AppState, ApiClient, ClassificationThresholds, DashboardConfig, DataMode, add_tracing_layer,
    build_router, graceful_shutdown, setup_logging,
};

/// The web server for the transaction dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the dashboard from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// URL of the backend endpoint that returns account summaries.
    #[arg(
        long,
        env = "ACCOUNT_SUMMARY_URL",
        default_value = "http://localhost:8080/api/account-summary"
    )]
    account_summary_url: String,

    /// URL of the backend endpoint that returns trial monitor data.
    #[arg(
        long,
        env = "TRIAL_MONITOR_URL",
        default_value = "http://localhost:8080/api/trial-monitor"
    )]
    trial_monitor_url: String,

    /// Show the built-in sample data instead of querying the backend.
    #[arg(long, env = "SAMPLE_DATA")]
    sample_data: bool,

    /// The canonical timezone used to work out today's date, e.g. "Asia/Ho_Chi_Minh".
    #[arg(long, env = "TIMEZONE", default_value = "Asia/Ho_Chi_Minh")]
    timezone: String,

    /// How long to wait for the backend before falling back to sample data.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    request_timeout_secs: u64,

    /// Accounts with a total volume above this are partners.
    #[arg(long, env = "PARTNER_VOLUME", default_value_t = ClassificationThresholds::default().partner_volume)]
    partner_volume: f64,

    /// Accounts with a total volume above this are potential partners.
    #[arg(long, env = "POTENTIAL_VOLUME", default_value_t = ClassificationThresholds::default().potential_volume)]
    potential_volume: f64,

    /// Trial accounts with transactions in at least this many ranges need a review.
    #[arg(long, env = "TRIAL_ACTIVE_RANGES", default_value_t = ClassificationThresholds::default().trial_active_ranges)]
    trial_active_ranges: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let mode = if args.sample_data {
        tracing::info!("Serving sample data, the backend will not be queried");
        DataMode::Sample
    } else {
        DataMode::Live
    };

    let api_client = match ApiClient::new(
        &args.account_summary_url,
        &args.trial_monitor_url,
        Duration::from_secs(args.request_timeout_secs),
        mode,
    ) {
        Ok(api_client) => api_client,
        Err(error) => {
            tracing::error!("Could not create the backend client: {error}");
            return ExitCode::FAILURE;
        }
    };

    let config = DashboardConfig {
        local_timezone: args.timezone,
        thresholds: ClassificationThresholds {
            partner_volume: args.partner_volume,
            potential_volume: args.potential_volume,
            trial_active_ranges: args.trial_active_ranges,
        },
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(AppState::new(api_client, config)));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped unexpectedly: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
