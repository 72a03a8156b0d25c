//! Transaction dashboard is a web app for watching the transaction volume of
//! business accounts.
//!
//! This library provides a server that fetches account analytics from the
//! analytics backend and directly serves HTML pages: a ranked account table
//! with period-over-period deltas, a statistics summary and a trial monitor
//! that flags trial accounts which need a review.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod api;
mod app_state;
mod dashboard;
mod endpoints;
mod format;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod statistics;
mod timezone;
mod trial;
mod trial_monitor;
mod view_state;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, DataMode};
pub use app_state::{AppState, DashboardConfig};
pub use logging::{add_tracing_layer, setup_logging};
pub use routing::build_router;
pub use trial::ClassificationThresholds;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the analytics backend could not be sent or its body
    /// could not be read, e.g. the backend is unreachable or timed out.
    #[error("request to the analytics backend failed: {0}")]
    Request(String),

    /// The analytics backend answered with a non-2xx status code.
    #[error("the analytics backend responded with status {0}")]
    HttpStatus(u16),

    /// The response body did not have the expected shape.
    #[error("malformed response from the analytics backend: {0}")]
    MalformedResponse(String),

    /// The start of the requested date range is after its end.
    #[error("the start date {0} is after the end date {1}")]
    InvalidDateRange(time::Date, time::Date),

    /// The number of ranges for the trial monitor is outside of the
    /// supported bounds.
    #[error("{0} is not a valid number of ranges")]
    InvalidRangeCount(usize),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Error::HttpStatus(status.as_u16()),
            None if value.is_decode() => Error::MalformedResponse(value.to_string()),
            None => Error::Request(value.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            error @ (Error::InvalidDateRange(..) | Error::InvalidRangeCount(_)) => {
                (StatusCode::BAD_REQUEST, error.into_alert().into_html()).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Describe the error as an alert that can be shown next to page content.
    fn into_alert(self) -> Alert {
        match self {
            Error::InvalidDateRange(from, to) => Alert::Error {
                message: "Khoảng thời gian không hợp lệ".to_owned(),
                details: format!(
                    "Ngày bắt đầu {from} sau ngày kết thúc {to}. \
                    Hãy chọn ngày bắt đầu trước hoặc bằng ngày kết thúc."
                ),
            },
            Error::InvalidRangeCount(count) => Alert::Error {
                message: "Số lượng khoảng không hợp lệ".to_owned(),
                details: format!(
                    "Không thể chia thời gian thành {count} khoảng. \
                    Hãy chọn từ 1 đến {} khoảng.",
                    trial::MAX_RANGE_COUNT
                ),
            },
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            },
            Error::Request(_) | Error::HttpStatus(_) | Error::MalformedResponse(_) => {
                Alert::Error {
                    message: "Lỗi tải dữ liệu".to_owned(),
                    details: "Không thể tải dữ liệu tài khoản. Đang hiển thị dữ liệu mẫu."
                        .to_owned(),
                }
            }
        }
    }
}
