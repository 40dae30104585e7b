use leptos::prelude::*;

use crate::components::lazy_image::LazyThumbnail;
use crate::format::format_optional_date;
use crate::posts::Post;

#[component]
pub fn PostCard(
    post: Post,
    eager: bool,
    #[prop(into)] language: String,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    let date_label = format_optional_date(post.published.as_ref(), &language);
    let published_iso = post.published.map(|d| d.to_rfc3339()).unwrap_or_default();
    let excerpt = (!post.excerpt.is_empty()).then(|| post.excerpt.clone());

    view! {
        <article
            class="recentpost flex flex-col h-full bg-white dark:bg-teal-800 border-2 border-gray-200 dark:border-teal-700 hover:border-seafoam-500 dark:hover:border-aqua-500 rounded-lg shadow-md hover:shadow-lg overflow-hidden transition-all"
            itemscope=""
            itemtype="https://schema.org/BlogPosting"
        >
            <meta itemprop="headline" content=post.title.clone()/>
            <meta itemprop="datePublished" content=published_iso.clone()/>
            <meta itemprop="author" content=post.author.clone()/>
            <a href=post.url.clone() class="block" tabindex="-1" aria-hidden="true">
                <LazyThumbnail
                    src=post.thumbnail.clone()
                    alt=post.title.clone()
                    eager=eager
                    placeholder=placeholder
                />
            </a>
            <div class="post-content flex flex-col flex-1 p-4">
                <h3 class="post-title text-sm md:text-base lg:text-lg font-semibold text-teal-600 dark:text-mint-400 line-clamp-2">
                    <a href=post.url.clone() rel="bookmark" itemprop="url" title=post.title.clone()>
                        {post.title.clone()}
                    </a>
                </h3>
                {excerpt.map(|text| {
                    view! {
                        <p
                            class="post-excerpt mt-2 text-xs md:text-sm text-gray-600 dark:text-gray-300 line-clamp-3"
                            itemprop="description"
                        >
                            {text}
                        </p>
                    }
                })}
                <div class="post-meta mt-auto pt-3 flex items-center justify-between text-xs md:text-sm">
                    <time class="post-date text-gray-500 dark:text-gray-400" datetime=published_iso>
                        {date_label}
                    </time>
                    <a
                        href=post.url.clone()
                        class="read-more text-seafoam-600 dark:text-aqua-400 hover:text-seafoam-700 dark:hover:text-aqua-300 transition-colors"
                        aria-label=format!("Read more about {}", post.title)
                    >
                        "Read More →"
                    </a>
                </div>
            </div>
        </article>
    }
}
