use leptos::prelude::*;

use crate::controller::{LoadState, SitemapController};
use crate::posts::Selection;

fn nav_button_class(active: bool) -> &'static str {
    if active {
        "label-btn active inline-flex items-center gap-2 px-4 py-2 rounded-full text-sm font-medium bg-seafoam-600 dark:bg-aqua-600 text-white border border-seafoam-600 dark:border-aqua-600 transition-colors"
    } else {
        "label-btn inline-flex items-center gap-2 px-4 py-2 rounded-full text-sm font-medium bg-white dark:bg-teal-800 text-gray-700 dark:text-gray-200 border border-gray-200 dark:border-teal-700 hover:border-seafoam-500 dark:hover:border-aqua-500 transition-colors"
    }
}

/// "All posts" followed by one button per label.
#[component]
pub fn LabelNav(controller: SitemapController) -> impl IntoView {
    let all_posts_title = controller.settings().all_posts_title;
    let all_active = Memo::new(move |_| controller.selection().with(|s| *s == Selection::Recent));

    view! {
        <nav
            class="label-nav flex flex-wrap justify-center gap-3 mb-8 px-4"
            aria-label="Category Navigation"
        >
            <button
                class=move || nav_button_class(all_active.get())
                aria-pressed=move || all_active.get().to_string()
                on:click=move |_| controller.load_all()
            >
                <span>"📋"</span>
                <span>{all_posts_title}</span>
            </button>
            {move || match controller.labels().get() {
                LoadState::Ready(labels) => {
                    labels
                        .into_iter()
                        .map(|label| {
                            let name = label.name.clone();
                            let active_name = label.name.clone();
                            let is_active = Memo::new(move |_| {
                                controller
                                    .selection()
                                    .with(|s| s.label() == Some(active_name.as_str()))
                            });
                            let icon = controller.label_icon(&label.name);
                            view! {
                                <button
                                    class=move || nav_button_class(is_active.get())
                                    aria-pressed=move || is_active.get().to_string()
                                    title=format!("{} ({} posts)", label.name, label.count)
                                    on:click=move |_| controller.load_label(name.clone())
                                >
                                    <span>{icon}</span>
                                    <span>{label.name.clone()}</span>
                                    <span class="label-count px-2 py-0.5 rounded-full text-xs bg-gray-100 dark:bg-teal-900">
                                        {label.count.to_string()}
                                    </span>
                                </button>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
                LoadState::Loading | LoadState::Failed(_) => ().into_any(),
            }}
        </nav>
    }
}
