use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

const THUMBNAIL_CLASS: &str = "post-thumbnail w-full aspect-[4/3] object-cover bg-gray-100 dark:bg-teal-900";
const ROOT_MARGIN: &str = "50px 0px";

/// Card thumbnail. Eager images get their real `src` immediately; lazy ones
/// start on the placeholder and carry the real url in `data-src` until they
/// scroll near the viewport.
#[component]
pub fn LazyThumbnail(
    #[prop(into)] src: String,
    #[prop(into)] alt: String,
    eager: bool,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    let fallback = placeholder.clone();

    if eager {
        return view! {
            <img
                class=THUMBNAIL_CLASS
                src=src
                alt=alt
                loading="eager"
                itemprop="image"
                on:error=move |ev| show_placeholder(ev.target(), &fallback)
            />
        }
        .into_any();
    }

    let node_ref = NodeRef::<leptos::html::Img>::new();
    Effect::new(move |_| {
        if let Some(img) = node_ref.get() {
            observe_until_visible(&img);
        }
    });

    view! {
        <img
            node_ref=node_ref
            class=THUMBNAIL_CLASS
            src=placeholder
            data-src=src
            alt=alt
            loading="lazy"
            itemprop="image"
            on:error=move |ev| show_placeholder(ev.target(), &fallback)
        />
    }
    .into_any()
}

fn show_placeholder(target: Option<web_sys::EventTarget>, fallback: &str) {
    let Some(img) = target.and_then(|t| t.dyn_into::<HtmlImageElement>().ok()) else {
        return;
    };
    if img.get_attribute("src").as_deref() != Some(fallback) {
        img.set_src(fallback);
    }
}

fn swap_in_source(img: &web_sys::Element) {
    if let Some(src) = img.get_attribute("data-src") {
        let _ = img.set_attribute("src", &src);
        let _ = img.remove_attribute("data-src");
    }
}

fn observe_until_visible(img: &HtmlImageElement) {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    swap_in_source(&target);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(ROOT_MARGIN);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            observer.observe(img);
            callback.forget();
        }
        // no observer support: load right away
        Err(_) => swap_in_source(img),
    }
}
