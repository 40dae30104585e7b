use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::posts::{Post, Selection};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Recent,
    Label(String),
}

impl From<&Selection> for CacheKey {
    fn from(selection: &Selection) -> Self {
        match selection {
            Selection::Recent => CacheKey::Recent,
            Selection::Label(name) => CacheKey::Label(name.clone()),
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    posts: Vec<Post>,
    created_at: DateTime<Utc>,
}

/// Post lists keyed by selection, each valid for `expiry` after insertion.
/// Expired entries read as misses and are dropped on access.
pub struct PostCache<C: Clock = SystemClock> {
    entries: HashMap<CacheKey, CacheEntry>,
    expiry: Duration,
    clock: C,
}

impl PostCache<SystemClock> {
    pub fn new(expiry: Duration) -> Self {
        Self::with_clock(expiry, SystemClock)
    }

    pub fn with_expiry_secs(secs: i64) -> Self {
        Self::new(Duration::seconds(secs))
    }
}

impl<C: Clock> PostCache<C> {
    pub fn with_clock(expiry: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            expiry,
            clock,
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<Vec<Post>> {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;
        if now - entry.created_at < self.expiry {
            log::debug!("cache hit for {key:?}");
            return Some(entry.posts.clone());
        }
        log::debug!("cache entry for {key:?} expired");
        self.entries.remove(key);
        None
    }

    pub fn put(&mut self, key: CacheKey, posts: Vec<Post>) {
        let created_at = self.clock.now();
        self.entries.insert(key, CacheEntry { posts, created_at });
    }

    pub fn invalidate(&mut self, key: &CacheKey) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(
                DateTime::parse_from_rfc3339("2025-01-20T00:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            )))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn post(url: &str) -> Post {
        Post {
            title: url.to_string(),
            url: url.to_string(),
            thumbnail: String::new(),
            excerpt: String::new(),
            published: None,
            updated: None,
            author: "Admin".into(),
            labels: vec![],
            comments_count: 0,
        }
    }

    #[test]
    fn test_put_then_get_returns_same_list() {
        let mut cache = PostCache::with_clock(Duration::hours(1), ManualClock::new());
        let posts = vec![post("a"), post("b")];
        cache.put(CacheKey::Label("Doa".into()), posts.clone());
        assert_eq!(cache.get(&CacheKey::Label("Doa".into())), Some(posts));
        assert_eq!(cache.get(&CacheKey::Recent), None);
    }

    #[test]
    fn test_entry_expires() {
        let clock = ManualClock::new();
        let mut cache = PostCache::with_clock(Duration::hours(1), clock.clone());
        cache.put(CacheKey::Recent, vec![post("a")]);

        clock.advance(Duration::minutes(59));
        assert!(cache.get(&CacheKey::Recent).is_some());

        clock.advance(Duration::minutes(1));
        assert_eq!(cache.get(&CacheKey::Recent), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_refreshes_timestamp() {
        let clock = ManualClock::new();
        let mut cache = PostCache::with_clock(Duration::seconds(10), clock.clone());
        cache.put(CacheKey::Recent, vec![post("a")]);
        clock.advance(Duration::seconds(8));
        cache.put(CacheKey::Recent, vec![post("b")]);
        clock.advance(Duration::seconds(8));
        assert_eq!(cache.get(&CacheKey::Recent), Some(vec![post("b")]));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = PostCache::with_clock(Duration::hours(1), ManualClock::new());
        cache.put(CacheKey::Recent, vec![post("a")]);
        cache.put(CacheKey::Label("A".into()), vec![post("b")]);

        cache.invalidate(&CacheKey::Recent);
        assert_eq!(cache.get(&CacheKey::Recent), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(CacheKey::from(&Selection::Recent), CacheKey::Recent);
        assert_eq!(
            CacheKey::from(&Selection::Label("Doa".into())),
            CacheKey::Label("Doa".into())
        );
    }
}
