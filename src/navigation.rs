//! The navigation bar shared by the dashboard and the trial monitor.

use maud::{Markup, html};

use crate::endpoints;

const CURRENT_LINK_STYLE: &str = "block py-2 px-3 text-white bg-blue-700 rounded-sm \
    lg:bg-transparent lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500";

const LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100 \
    lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0 dark:text-white \
    lg:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white \
    lg:dark:hover:bg-transparent";

/// The pages listed in the navigation bar, in display order.
const PAGES: [(&str, &str); 2] = [
    (endpoints::DASHBOARD_VIEW, "Tổng quan"),
    (endpoints::TRIAL_MONITOR_VIEW, "Theo dõi dùng thử"),
];

#[derive(Clone)]
struct NavLink<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl NavLink<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            CURRENT_LINK_STYLE
        } else {
            LINK_STYLE
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<NavLink<'a>>,
}

impl NavBar<'_> {
    /// The navigation bar with the link to `current_page` highlighted.
    pub fn new(current_page: &str) -> NavBar<'static> {
        let links = PAGES
            .iter()
            .map(|&(url, title)| NavLink {
                url,
                title,
                is_current: url == current_page,
            })
            .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Giao dịch doanh nghiệp"
                    }

                    ul class="font-medium flex flex-row p-0 space-x-8 border-0"
                    {
                        @for link in self.links {
                            li { (link.into_html()) }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::Html;

    use crate::{endpoints, navigation::NavBar, test_utils::select_texts};

    #[test]
    fn only_the_current_page_is_highlighted() {
        let cases = [
            (endpoints::DASHBOARD_VIEW, Some(endpoints::DASHBOARD_VIEW)),
            (endpoints::TRIAL_MONITOR_VIEW, Some(endpoints::TRIAL_MONITOR_VIEW)),
            (endpoints::ROOT, None),
            (endpoints::INTERNAL_ERROR_VIEW, None),
        ];

        for (page, want) in cases {
            let current: Vec<_> = NavBar::new(page)
                .links
                .into_iter()
                .filter(|link| link.is_current)
                .map(|link| link.url)
                .collect();

            assert_eq!(current, want.into_iter().collect::<Vec<_>>(), "page {page}");
        }
    }

    #[test]
    fn marks_current_page_in_html() {
        let html = NavBar::new(endpoints::TRIAL_MONITOR_VIEW)
            .into_html()
            .into_string();
        let html = Html::parse_fragment(&html);

        assert_eq!(
            select_texts(&html, "a[aria-current='page']"),
            ["Theo dõi dùng thử"]
        );
        assert_eq!(select_texts(&html, "li a").len(), 2);
    }
}
