use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::extract::FromRef;
        use leptos::prelude::LeptosOptions;
        use std::sync::Arc;

        use crate::config::SitemapConfig;
        use crate::feed::{FeedClient, FeedError};
        use crate::posts::PostTransformer;

        #[derive(FromRef, Clone)]
        pub struct AppState {
            pub leptos_options: LeptosOptions,
            pub config: Arc<SitemapConfig>,
            pub feed_client: FeedClient,
            pub transformer: Arc<PostTransformer>,
        }

        impl AppState {
            pub fn new(leptos_options: LeptosOptions, config: SitemapConfig) -> Result<Self, FeedError> {
                let feed_client = FeedClient::new(&config.feed)?;
                let transformer = PostTransformer::from_config(&config.feed);
                Ok(Self {
                    leptos_options,
                    config: Arc::new(config),
                    feed_client,
                    transformer: Arc::new(transformer),
                })
            }
        }
    }
}
