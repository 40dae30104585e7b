use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::sitemap::BlogSitemap;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ms">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/blog_sitemap.css" />
        <Title text="Sitemap" />
        <Meta name="description" content="Every post on the blog, grouped by category." />
        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=SitemapPage />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn SitemapPage() -> impl IntoView {
    view! {
        <div class="w-full min-h-screen mx-auto bg-gray-100 dark:bg-teal-900">
            <h1 class="text-3xl text-center text-seafoam-600 dark:text-mint-400 p-6 font-bold">
                "Sitemap"
            </h1>
            <BlogSitemap />
        </div>
    }
}
