use leptos::prelude::*;

use crate::config::WidgetSettings;
use crate::labels::Label;
use crate::posts::{Post, Selection};

#[cfg(feature = "ssr")]
mod ssr {
    use leptos::prelude::*;

    use crate::feed::FeedError;
    use crate::state::AppState;

    pub fn app_state() -> Result<AppState, ServerFnError> {
        use_context::<AppState>().ok_or_else(|| {
            log::error!("AppState missing from server function context");
            ServerFnError::ServerError("server state unavailable".to_string())
        })
    }

    pub fn to_server_error(e: FeedError) -> ServerFnError {
        log::error!("feed load failed (retryable: {}): {e}", e.is_retryable());
        ServerFnError::ServerError(e.to_string())
    }
}

#[server(GetWidgetSettings, "/api")]
pub async fn get_widget_settings() -> Result<WidgetSettings, ServerFnError> {
    let state = ssr::app_state()?;
    Ok(state.config.widget.clone())
}

#[server(GetLabels, "/api")]
pub async fn get_labels() -> Result<Vec<Label>, ServerFnError> {
    use crate::feed::FeedQuery;
    use crate::labels::aggregate_labels;
    use log::{debug, info};

    let state = ssr::app_state()?;
    let feed = &state.config.feed;

    let document = state
        .feed_client
        .fetch(&FeedQuery::label_scan(feed.label_scan_results))
        .await
        .map_err(ssr::to_server_error)?;

    let labels = aggregate_labels(document.entries(), feed.max_labels);
    debug!("label counts: {labels:?}");
    info!(
        "aggregated {} labels from {} of {} entries",
        labels.len(),
        document.entries().len(),
        document.total_results().unwrap_or_default()
    );
    Ok(labels)
}

#[server(GetPosts, "/api")]
pub async fn get_posts(selection: Selection) -> Result<Vec<Post>, ServerFnError> {
    use crate::feed::FeedQuery;
    use log::info;

    let state = ssr::app_state()?;
    let feed = &state.config.feed;

    let query = match &selection {
        Selection::Recent => FeedQuery::recent(feed.recent_posts),
        Selection::Label(label) => FeedQuery::for_label(label.clone(), feed.posts_per_label),
    };
    let document = state
        .feed_client
        .fetch(&query)
        .await
        .map_err(ssr::to_server_error)?;

    let posts = state.transformer.transform_feed(&document);
    info!("transformed {} posts for {selection:?}", posts.len());
    Ok(posts)
}
