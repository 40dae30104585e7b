use leptos::prelude::*;
use leptos_icons::Icon;

#[component]
pub fn LoadingState() -> impl IntoView {
    view! {
        <div class="loading-container flex flex-col items-center justify-center py-16" role="status">
            <div class="loading-spinner w-10 h-10 border-4 border-gray-200 dark:border-teal-700 border-t-seafoam-500 dark:border-t-aqua-400 rounded-full animate-spin"></div>
            <p class="mt-4 text-teal-600 dark:text-aqua-400">"Loading..."</p>
        </div>
    }
}

#[component]
pub fn ErrorState(
    #[prop(into)] message: String,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-message text-center py-12" role="alert">
            <p class="text-salmon-600 dark:text-salmon-400 mb-4">{message}</p>
            <button
                class="inline-flex items-center gap-2 px-4 py-2 rounded-md bg-seafoam-600 dark:bg-aqua-600 text-white hover:bg-seafoam-700 dark:hover:bg-aqua-700 transition-colors"
                on:click=move |_| on_retry.run(())
            >
                <Icon icon=icondata_bs::BsArrowClockwise width="16" height="16"/>
                "Try Again"
            </button>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] message: String,
    #[prop(optional, into)] action: Option<(String, Callback<()>)>,
) -> impl IntoView {
    view! {
        <div class="no-posts text-center py-12 text-gray-500 dark:text-gray-400">
            <p>{message}</p>
            {action.map(|(label, on_click)| {
                view! {
                    <button
                        class="mt-4 text-seafoam-600 dark:text-aqua-400 hover:underline"
                        on:click=move |_| on_click.run(())
                    >
                        {label}
                    </button>
                }
            })}
        </div>
    }
}
