use leptos::prelude::*;
use leptos_icons::Icon;

use crate::controller::{LoadState, SitemapController};
use crate::pagination::{page_window, PageMarker, PageView};

const WINDOW_RADIUS: usize = 1;

fn page_button_class(current: bool) -> &'static str {
    if current {
        "min-w-9 h-9 px-3 rounded-md text-sm font-medium bg-seafoam-600 dark:bg-aqua-600 text-white"
    } else {
        "min-w-9 h-9 px-3 rounded-md text-sm font-medium bg-white dark:bg-teal-800 text-gray-700 dark:text-gray-200 border border-gray-200 dark:border-teal-700 hover:border-seafoam-500 dark:hover:border-aqua-500"
    }
}

const STEP_BUTTON_CLASS: &str = "inline-flex items-center justify-center w-9 h-9 rounded-md bg-white dark:bg-teal-800 text-gray-700 dark:text-gray-200 border border-gray-200 dark:border-teal-700 disabled:opacity-40 disabled:cursor-not-allowed";

/// Previous / page numbers / next. Renders nothing for a single page.
#[component]
pub fn PaginationControls(controller: SitemapController) -> impl IntoView {
    move || {
        let LoadState::Ready(PageView::Page(slice)) = controller.page_view() else {
            return ().into_any();
        };
        let total_pages = slice.total_pages();
        if total_pages <= 1 {
            return ().into_any();
        }
        let current = slice.page;

        view! {
            <nav class="pagination flex items-center justify-center gap-2 mt-8" aria-label="Pagination">
                <button
                    class=STEP_BUTTON_CLASS
                    aria-label="Previous page"
                    disabled=!slice.has_previous()
                    on:click=move |_| controller.go_to_page(current - 1)
                >
                    <Icon icon=icondata_bs::BsChevronLeft width="16" height="16"/>
                </button>
                {page_window(current, total_pages, WINDOW_RADIUS)
                    .into_iter()
                    .map(|marker| match marker {
                        PageMarker::Gap => {
                            view! { <span class="px-1 text-gray-400">"…"</span> }.into_any()
                        }
                        PageMarker::Page(page) => {
                            view! {
                                <button
                                    class=page_button_class(page == current)
                                    aria-current=(page == current).then_some("page")
                                    on:click=move |_| controller.go_to_page(page)
                                >
                                    {page.to_string()}
                                </button>
                            }
                                .into_any()
                        }
                    })
                    .collect_view()}
                <button
                    class=STEP_BUTTON_CLASS
                    aria-label="Next page"
                    disabled=!slice.has_next()
                    on:click=move |_| controller.go_to_page(current + 1)
                >
                    <Icon icon=icondata_bs::BsChevronRight width="16" height="16"/>
                </button>
            </nav>
        }
            .into_any()
    }
}
