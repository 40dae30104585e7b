use leptos::prelude::*;

use crate::components::label_nav::LabelNav;
use crate::components::pagination::PaginationControls;
use crate::components::post_card::PostCard;
use crate::components::status::{EmptyState, ErrorState, LoadingState};
use crate::config::WidgetSettings;
use crate::controller::{LoadState, SitemapController};
use crate::pagination::PageView;
use crate::posts::Selection;
use crate::seo::SCHEMA_SCRIPT_ID;
use crate::server_fn::get_widget_settings;

#[cfg(feature = "hydrate")]
macro_rules! console_log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into());
    };
}

#[cfg(not(feature = "hydrate"))]
macro_rules! console_log {
    ($($t:tt)*) => {
        log::info!($($t)*);
    };
}

/// Full widget for the server-rendered page: settings come from the server,
/// then nav, grid and pagination render together.
#[component]
pub fn BlogSitemap() -> impl IntoView {
    let settings_resource = Resource::new(|| (), |_| get_widget_settings());

    view! {
        <Suspense fallback=|| view! { <LoadingState/> }>
            {move || {
                settings_resource
                    .get()
                    .map(|result| match result {
                        Ok(settings) => view! { <SitemapWidget settings=settings/> }.into_any(),
                        Err(e) => {
                            console_log!("Error loading sitemap settings: {:?}", e);
                            view! {
                                <ErrorState
                                    message="Failed to load the sitemap. Please try again."
                                    on_retry=move |_: ()| settings_resource.refetch()
                                />
                            }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
pub fn SitemapWidget(settings: WidgetSettings) -> impl IntoView {
    let controller = SitemapController::new(settings);

    Effect::new(move |_| controller.initialize());

    view! {
        <section class="blog-sitemap w-full max-w-7xl mx-auto px-4 py-8">
            <LabelNav controller=controller/>
            <SitemapGrid controller=controller/>
            <PaginationControls controller=controller/>
        </section>
    }
}

fn header_icon(controller: &SitemapController) -> String {
    match controller.selection().get() {
        Selection::Recent => "📋".to_string(),
        Selection::Label(name) => controller.label_icon(&name),
    }
}

/// Header, cards, and status views for the current selection.
#[component]
pub fn SitemapGrid(controller: SitemapController) -> impl IntoView {
    let settings = controller.settings();
    let eager_images = settings.eager_images;
    let language = settings.language;
    let placeholder = settings.placeholder_thumbnail;

    sync_structured_data(controller);

    view! {
        <div class="sitemap-grid">
            <h2 class="sitemap-header flex items-center gap-3 mb-6 text-xl md:text-2xl font-semibold text-teal-600 dark:text-mint-400">
                <span class="sitemap-icon">{move || header_icon(&controller)}</span>
                <span>{move || controller.collection_name()}</span>
            </h2>
            {move || match controller.page_view() {
                LoadState::Loading => view! { <LoadingState/> }.into_any(),
                LoadState::Failed(message) => {
                    view! { <ErrorState message=message on_retry=move |_: ()| controller.retry()/> }
                        .into_any()
                }
                LoadState::Ready(PageView::NoResults) => {
                    view! { <EmptyState message="No posts found"/> }.into_any()
                }
                LoadState::Ready(PageView::OutOfRange { last_page }) => {
                    let back = Callback::new(move |_: ()| controller.go_to_page(last_page));
                    view! {
                        <EmptyState
                            message=format!("This page is empty. The last page is {last_page}.")
                            action=(format!("Go to page {last_page}"), back)
                        />
                    }
                        .into_any()
                }
                LoadState::Ready(PageView::Page(slice)) => {
                    let language = language.clone();
                    let placeholder = placeholder.clone();
                    view! {
                        <div class="posts-grid grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-4">
                            {slice
                                .posts
                                .into_iter()
                                .enumerate()
                                .map(|(index, post)| {
                                    view! {
                                        <PostCard
                                            post=post
                                            eager={index < eager_images}
                                            language=language.clone()
                                            placeholder=placeholder.clone()
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

/// Keeps the JSON-LD block in the document head in step with the grid.
fn sync_structured_data(controller: SitemapController) {
    let schema = Memo::new(move |_| controller.structured_data());

    Effect::new(move |_| {
        if let Some(json) = schema.get() {
            write_schema_script(&json);
        }
    });
    on_cleanup(remove_schema_script);
}

fn write_schema_script(json: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let script = match document.get_element_by_id(SCHEMA_SCRIPT_ID) {
        Some(script) => script,
        None => {
            let Ok(script) = document.create_element("script") else {
                return;
            };
            script.set_id(SCHEMA_SCRIPT_ID);
            let _ = script.set_attribute("type", "application/ld+json");
            if let Some(head) = document.head() {
                let _ = head.append_child(&script);
            }
            script
        }
    };
    script.set_text_content(Some(json));
}

fn remove_schema_script() {
    if let Some(script) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SCHEMA_SCRIPT_ID))
    {
        script.remove();
    }
}
