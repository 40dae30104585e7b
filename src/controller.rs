use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cache::{CacheKey, PostCache};
use crate::config::WidgetSettings;
use crate::labels::{label_icon, Label};
use crate::pagination::{paginate, PageView};
use crate::posts::{Post, Selection};
use crate::seo::collection_schema;
use crate::server_fn::{get_labels, get_posts};

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

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// User-facing message. The grid offers a retry next to it.
    Failed(String),
}

/// Hands out increasing tickets so a response can tell whether a newer
/// request has replaced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    current: u64,
}

impl RequestSequencer {
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current == ticket
    }
}

/// What the retry button re-runs.
#[derive(Clone, Debug, PartialEq, Eq)]
enum RetryAction {
    Initialize,
    Load(Selection),
}

/// State of one mounted sitemap widget. Created on mount, cleared on
/// refresh. Cheap to copy; every handle points at the same state.
#[derive(Clone, Copy)]
pub struct SitemapController {
    settings: StoredValue<WidgetSettings>,
    cache: StoredValue<PostCache>,
    label_sequencer: StoredValue<RequestSequencer>,
    post_sequencer: StoredValue<RequestSequencer>,
    last_failure: StoredValue<Option<RetryAction>>,
    labels: RwSignal<LoadState<Vec<Label>>>,
    selection: RwSignal<Selection>,
    posts: RwSignal<LoadState<Vec<Post>>>,
    page: RwSignal<usize>,
}

impl SitemapController {
    pub fn new(settings: WidgetSettings) -> Self {
        let cache = PostCache::with_expiry_secs(settings.cache_expiry_secs);
        Self {
            settings: StoredValue::new(settings),
            cache: StoredValue::new(cache),
            label_sequencer: StoredValue::new(RequestSequencer::default()),
            post_sequencer: StoredValue::new(RequestSequencer::default()),
            last_failure: StoredValue::new(None),
            labels: RwSignal::new(LoadState::Loading),
            selection: RwSignal::new(Selection::Recent),
            posts: RwSignal::new(LoadState::Loading),
            page: RwSignal::new(1),
        }
    }

    pub fn settings(&self) -> WidgetSettings {
        self.settings.get_value()
    }

    pub fn labels(&self) -> ReadSignal<LoadState<Vec<Label>>> {
        self.labels.read_only()
    }

    pub fn selection(&self) -> ReadSignal<Selection> {
        self.selection.read_only()
    }

    pub fn page(&self) -> ReadSignal<usize> {
        self.page.read_only()
    }

    /// Loads the label list, then the first label's posts (or recent posts
    /// when the blog has no labels).
    pub fn initialize(&self) {
        let label_ticket = next_ticket(self.label_sequencer);
        let post_ticket = next_ticket(self.post_sequencer);
        self.last_failure.set_value(None);
        self.labels.set(LoadState::Loading);
        self.posts.set(LoadState::Loading);

        let this = *self;
        spawn_local(async move {
            let result = get_labels().await.map_err(|e| e.to_string());
            this.finish_labels(label_ticket, post_ticket, result);
        });
    }

    /// Applies a label-scan response. The label list is kept whenever the
    /// scan is still current; the automatic first load is skipped if the
    /// user has started another load in the meantime.
    fn finish_labels(&self, label_ticket: u64, post_ticket: u64, result: Result<Vec<Label>, String>) {
        if !is_current(self.label_sequencer, label_ticket) {
            console_log!("discarding superseded label response");
            return;
        }
        let user_moved_on = !is_current(self.post_sequencer, post_ticket);

        match result {
            Ok(labels) => {
                console_log!("loaded {} labels", labels.len());
                let first = labels.first().map(|label| label.name.clone());
                self.labels.set(LoadState::Ready(labels));
                if user_moved_on {
                    return;
                }
                match first {
                    Some(name) => self.load_label(name),
                    None => self.load_all(),
                }
            }
            Err(e) => {
                console_log!("failed to load labels: {e}");
                self.labels.set(LoadState::Failed(e));
                if !user_moved_on {
                    self.fail(
                        RetryAction::Initialize,
                        "Failed to load categories. Please try again.".to_string(),
                    );
                }
            }
        }
    }

    /// Drops every cached list and starts over.
    pub fn refresh(&self) {
        self.cache.update_value(|cache| cache.clear());
        self.initialize();
    }

    pub fn load_label(&self, label: impl Into<String>) {
        self.load(Selection::Label(label.into()));
    }

    pub fn load_all(&self) {
        self.load(Selection::Recent);
    }

    pub fn go_to_page(&self, page: usize) {
        self.page.set(page.max(1));
    }

    pub fn retry(&self) {
        match self.retry_action() {
            RetryAction::Load(selection) => self.load(selection),
            RetryAction::Initialize => self.initialize(),
        }
    }

    /// A failed label list always means starting over, whatever failed last.
    fn retry_action(&self) -> RetryAction {
        let labels_failed = self
            .labels
            .with_untracked(|labels| matches!(labels, LoadState::Failed(_)));
        if labels_failed {
            return RetryAction::Initialize;
        }
        self.last_failure
            .get_value()
            .unwrap_or(RetryAction::Initialize)
    }

    fn load(&self, selection: Selection) {
        let ticket = next_ticket(self.post_sequencer);
        let key = CacheKey::from(&selection);
        self.selection.set(selection.clone());
        self.page.set(1);

        let cached = self.cache.try_update_value(|cache| cache.get(&key)).flatten();
        if let Some(posts) = cached {
            console_log!("serving {} cached posts for {selection:?}", posts.len());
            self.posts.set(LoadState::Ready(posts));
            return;
        }

        self.posts.set(LoadState::Loading);
        let this = *self;
        spawn_local(async move {
            let result = get_posts(selection.clone()).await.map_err(|e| e.to_string());
            this.finish_posts(ticket, selection, result);
        });
    }

    fn finish_posts(&self, ticket: u64, selection: Selection, result: Result<Vec<Post>, String>) {
        if !is_current(self.post_sequencer, ticket) {
            console_log!("discarding superseded response for {selection:?}");
            return;
        }

        match result {
            Ok(posts) => {
                console_log!("loaded {} posts for {selection:?}", posts.len());
                let key = CacheKey::from(&selection);
                self.cache.update_value(|cache| cache.put(key, posts.clone()));
                self.posts.set(LoadState::Ready(posts));
            }
            Err(e) => {
                console_log!("failed to load posts for {selection:?}: {e}");
                let message = match selection.label() {
                    Some(label) => format!("Failed to load posts for {label}."),
                    None => "Failed to load recent posts.".to_string(),
                };
                self.fail(RetryAction::Load(selection), message);
            }
        }
    }

    fn fail(&self, action: RetryAction, message: String) {
        self.last_failure.set_value(Some(action));
        self.posts.set(LoadState::Failed(message));
    }

    /// Heading for the current selection.
    pub fn collection_name(&self) -> String {
        match self.selection.get() {
            Selection::Recent => self.settings.with_value(|s| s.all_posts_title.clone()),
            Selection::Label(name) => name,
        }
    }

    pub fn label_icon(&self, label: &str) -> String {
        self.settings
            .with_value(|s| label_icon(label, &s.label_icons).to_string())
    }

    /// The visible page of the current selection. Reactive.
    pub fn page_view(&self) -> LoadState<PageView> {
        let page = self.page.get();
        let selection = self.selection.get();
        let page_size = self.settings.with_value(|s| s.page_size);

        self.posts.with(|state| match state {
            LoadState::Loading => LoadState::Loading,
            LoadState::Failed(message) => LoadState::Failed(message.clone()),
            LoadState::Ready(posts) => {
                let slice = paginate(posts, selection.label(), page, page_size);
                LoadState::Ready(PageView::from(slice))
            }
        })
    }

    /// JSON-LD for whatever the grid currently shows, or `None` while
    /// loading or failed.
    pub fn structured_data(&self) -> Option<String> {
        let posts = match self.page_view() {
            LoadState::Ready(PageView::Page(slice)) => slice.posts,
            LoadState::Ready(_) => Vec::new(),
            LoadState::Loading | LoadState::Failed(_) => return None,
        };
        let name = self.collection_name();
        let schema = self
            .settings
            .with_value(|settings| collection_schema(&posts, &name, settings));
        serde_json::to_string(&schema).ok()
    }
}

fn next_ticket(sequencer: StoredValue<RequestSequencer>) -> u64 {
    sequencer
        .try_update_value(|sequencer| sequencer.begin())
        .unwrap_or_default()
}

fn is_current(sequencer: StoredValue<RequestSequencer>, ticket: u64) -> bool {
    sequencer
        .try_with_value(|sequencer| sequencer.is_current(ticket))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_posts(count: usize) -> Vec<Post> {
        (1..=count)
            .map(|n| Post {
                title: format!("post {n}"),
                url: format!("https://x.test/{n}"),
                thumbnail: String::new(),
                excerpt: String::new(),
                published: None,
                updated: None,
                author: "Admin".into(),
                labels: vec![],
                comments_count: 0,
            })
            .collect()
    }

    fn doa() -> Selection {
        Selection::Label("Doa".into())
    }

    fn labels() -> Vec<Label> {
        vec![Label { name: "Doa".into(), count: 3 }]
    }

    #[test]
    fn test_sequencer_invalidates_older_tickets() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.begin();
        assert!(sequencer.is_current(first));

        let second = sequencer.begin();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_sequencer_starts_above_default_ticket() {
        let mut sequencer = RequestSequencer::default();
        assert!(!sequencer.is_current(1));
        assert_eq!(sequencer.begin(), 1);
    }

    #[test]
    fn test_controller_defaults() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            assert_eq!(controller.selection().get_untracked(), Selection::Recent);
            assert_eq!(controller.page().get_untracked(), 1);
            assert_eq!(controller.labels().get_untracked(), LoadState::Loading);
        });
    }

    #[test]
    fn test_page_is_at_least_one() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            controller.go_to_page(0);
            assert_eq!(controller.page().get_untracked(), 1);
            controller.go_to_page(4);
            assert_eq!(controller.page().get_untracked(), 4);
        });
    }

    #[test]
    fn test_page_view_paginates_ready_posts() {
        let owner = Owner::new();
        owner.with(|| {
            let settings = WidgetSettings {
                page_size: 2,
                ..WidgetSettings::default()
            };
            let controller = SitemapController::new(settings);
            controller.posts.set(LoadState::Ready(numbered_posts(3)));
            controller.go_to_page(2);

            match controller.page_view() {
                LoadState::Ready(PageView::Page(slice)) => {
                    assert_eq!(slice.posts.len(), 1);
                    assert_eq!(slice.posts[0].title, "post 3");
                    assert_eq!(slice.total_pages(), 2);
                }
                other => panic!("unexpected view: {other:?}"),
            }

            controller.go_to_page(3);
            assert_eq!(
                controller.page_view(),
                LoadState::Ready(PageView::OutOfRange { last_page: 2 })
            );
            assert!(controller.structured_data().is_some());
        });
    }

    #[test]
    fn test_collection_name_follows_selection() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            assert_eq!(controller.collection_name(), "Recent Posts");
            controller.selection.set(Selection::Label("Doa".into()));
            assert_eq!(controller.collection_name(), "Doa");
        });
    }

    #[test]
    fn test_label_scan_survives_a_load_started_meanwhile() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            let label_ticket = next_ticket(controller.label_sequencer);
            let post_ticket = next_ticket(controller.post_sequencer);

            // user clicks "all posts" before the scan answers
            controller
                .cache
                .update_value(|cache| cache.put(CacheKey::Recent, numbered_posts(2)));
            controller.load_all();

            controller.finish_labels(label_ticket, post_ticket, Ok(labels()));
            assert_eq!(controller.labels().get_untracked(), LoadState::Ready(labels()));
            assert_eq!(controller.selection().get_untracked(), Selection::Recent);
            assert_eq!(
                controller.posts.get_untracked(),
                LoadState::Ready(numbered_posts(2))
            );
        });
    }

    #[test]
    fn test_label_scan_loads_first_label() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            let label_ticket = next_ticket(controller.label_sequencer);
            let post_ticket = next_ticket(controller.post_sequencer);
            controller
                .cache
                .update_value(|cache| cache.put(CacheKey::Label("Doa".into()), numbered_posts(1)));

            controller.finish_labels(label_ticket, post_ticket, Ok(labels()));
            assert_eq!(controller.selection().get_untracked(), doa());
            assert_eq!(
                controller.posts.get_untracked(),
                LoadState::Ready(numbered_posts(1))
            );
        });
    }

    #[test]
    fn test_superseded_label_scan_is_dropped() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            let stale = next_ticket(controller.label_sequencer);
            let post_ticket = next_ticket(controller.post_sequencer);
            next_ticket(controller.label_sequencer);

            controller.finish_labels(stale, post_ticket, Ok(labels()));
            assert_eq!(controller.labels().get_untracked(), LoadState::Loading);
        });
    }

    #[test]
    fn test_superseded_post_response_is_dropped() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            let stale = next_ticket(controller.post_sequencer);
            controller
                .cache
                .update_value(|cache| cache.put(CacheKey::Recent, numbered_posts(2)));
            controller.load_all();

            controller.finish_posts(stale, doa(), Ok(numbered_posts(5)));
            assert_eq!(
                controller.posts.get_untracked(),
                LoadState::Ready(numbered_posts(2))
            );
            let cached = controller
                .cache
                .try_update_value(|cache| cache.get(&CacheKey::Label("Doa".into())))
                .flatten();
            assert!(cached.is_none());
        });
    }

    #[test]
    fn test_post_failure_retries_that_selection() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            controller.labels.set(LoadState::Ready(labels()));
            let ticket = next_ticket(controller.post_sequencer);

            controller.finish_posts(ticket, doa(), Err("timed out".into()));
            assert_eq!(
                controller.posts.get_untracked(),
                LoadState::Failed("Failed to load posts for Doa.".into())
            );
            assert_eq!(controller.retry_action(), RetryAction::Load(doa()));

            controller
                .cache
                .update_value(|cache| cache.put(CacheKey::Label("Doa".into()), numbered_posts(1)));
            controller.retry();
            assert_eq!(controller.selection().get_untracked(), doa());
            assert_eq!(
                controller.posts.get_untracked(),
                LoadState::Ready(numbered_posts(1))
            );
        });
    }

    #[test]
    fn test_label_failure_retries_initialize() {
        let owner = Owner::new();
        owner.with(|| {
            let controller = SitemapController::new(WidgetSettings::default());
            let label_ticket = next_ticket(controller.label_sequencer);
            let post_ticket = next_ticket(controller.post_sequencer);

            controller.finish_labels(label_ticket, post_ticket, Err("offline".into()));
            assert_eq!(
                controller.labels().get_untracked(),
                LoadState::Failed("offline".into())
            );
            assert!(matches!(controller.posts.get_untracked(), LoadState::Failed(_)));
            assert_eq!(controller.retry_action(), RetryAction::Initialize);

            // a later post failure must not hide the missing label list
            let ticket = next_ticket(controller.post_sequencer);
            controller.finish_posts(ticket, Selection::Recent, Err("offline".into()));
            assert_eq!(controller.retry_action(), RetryAction::Initialize);
        });
    }
}
