//! Alert system for displaying success and error messages to users.
//!
//! Alerts play the role of toast notifications: they are rendered into the
//! fixed alert container at the bottom of the page and can be dismissed.

use axum::response::Html;
use maud::{Markup, html};

/// A message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action completed.
    Success {
        /// Short summary of what happened.
        message: String,
        /// Longer description.
        details: String,
    },
    /// The action failed or only partially succeeded.
    Error {
        /// Short summary of what went wrong.
        message: String,
        /// Longer description, e.g. how the page recovered.
        details: String,
    },
}

impl Alert {
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    pub fn into_markup(self) -> Markup {
        let (container_style, title_style, role, message, details) = match self {
            Alert::Success { message, details } => (
                "flex items-start gap-3 p-4 mb-2 text-sm text-green-800 rounded-lg \
                bg-green-50 border border-green-300 shadow dark:bg-gray-800 \
                dark:text-green-400 dark:border-green-800",
                "font-semibold",
                "status",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "flex items-start gap-3 p-4 mb-2 text-sm text-red-800 rounded-lg \
                bg-red-50 border border-red-300 shadow dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800",
                "font-semibold",
                "alert",
                message,
                details,
            ),
        };

        html!(
            div class=(container_style) role=(role) data-alert
            {
                div class="flex-1"
                {
                    p class=(title_style) { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 hover:opacity-75"
                    aria-label="Dismiss"
                    onclick="this.closest('[data-alert]').remove()"
                {
                    "✕"
                }
            }
        )
    }
}

/// Renders the container that holds the page's alerts.
///
/// Set `out_of_band` for htmx partial responses so that the alerts replace the
/// container that is already on the page.
pub fn alert_container(alerts: Vec<Alert>, out_of_band: bool) -> Markup {
    html!(
        div
            id="alert-container"
            class="w-full max-w-md px-4"
            style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            hx-swap-oob=[out_of_band.then_some("true")]
        {
            @for alert in alerts {
                (alert.into_markup())
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{Alert, alert_container};

    #[test]
    fn renders_error_alert_with_details() {
        let alert = Alert::Error {
            message: "Error fetching data".to_owned(),
            details: "Showing sample data instead.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_markup().into_string());

        let selector = Selector::parse("[role='alert'] p").unwrap();
        let text: Vec<String> = html
            .select(&selector)
            .map(|p| p.text().collect::<String>())
            .collect();
        assert_eq!(text, ["Error fetching data", "Showing sample data instead."]);
    }

    #[test]
    fn omits_empty_details() {
        let alert = Alert::Success {
            message: "Loaded".to_owned(),
            details: String::new(),
        };

        let html = Html::parse_fragment(&alert.into_markup().into_string());

        let selector = Selector::parse("[role='status'] p").unwrap();
        assert_eq!(html.select(&selector).count(), 1);
    }

    #[test]
    fn out_of_band_container_sets_swap_attribute() {
        let html = Html::parse_fragment(&alert_container(vec![], true).into_string());
        let selector = Selector::parse("#alert-container[hx-swap-oob='true']").unwrap();
        assert!(html.select(&selector).next().is_some());

        let html = Html::parse_fragment(&alert_container(vec![], false).into_string());
        let selector = Selector::parse("#alert-container[hx-swap-oob]").unwrap();
        assert!(html.select(&selector).next().is_none());
    }
}
