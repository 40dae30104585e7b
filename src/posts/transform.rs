use chrono::{DateTime, FixedOffset};

use super::excerpt::excerpt;
use super::{Post, ThumbnailPipeline};
use crate::config::FeedConfig;
use crate::feed::{Entry, FeedDocument, TextNode};

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Maps raw feed entries to [`Post`]s. Every field has a fallback, so a
/// transform never fails.
pub struct PostTransformer {
    thumbnails: ThumbnailPipeline,
    excerpt_length: usize,
}

impl PostTransformer {
    pub fn new(thumbnails: ThumbnailPipeline, excerpt_length: usize) -> Self {
        Self {
            thumbnails,
            excerpt_length,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(
            ThumbnailPipeline::standard(config.image_size, config.placeholder_thumbnail.clone()),
            config.excerpt_length,
        )
    }

    pub fn transform(&self, entry: &Entry) -> Post {
        let mut labels: Vec<String> = Vec::new();
        for term in entry.terms() {
            if !labels.iter().any(|l| l == term) {
                labels.push(term.to_string());
            }
        }

        Post {
            title: entry.title().map(str::trim).unwrap_or(UNTITLED).to_string(),
            url: entry
                .alternate_url()
                .or_else(|| entry.id.as_ref().map(|id| id.text.as_str()))
                .unwrap_or_default()
                .to_string(),
            thumbnail: self.thumbnails.extract(entry),
            excerpt: excerpt(entry.body(), self.excerpt_length),
            published: parse_timestamp(&entry.published),
            updated: parse_timestamp(&entry.updated).or_else(|| parse_timestamp(&entry.published)),
            author: entry.author_name().unwrap_or(DEFAULT_AUTHOR).trim().to_string(),
            labels,
            comments_count: entry
                .total_comments
                .as_ref()
                .and_then(|n| n.text.trim().parse().ok())
                .unwrap_or(0),
        }
    }

    /// Entries in source order.
    pub fn transform_feed(&self, document: &FeedDocument) -> Vec<Post> {
        document.entries().iter().map(|entry| self.transform(entry)).collect()
    }
}

fn parse_timestamp(node: &Option<TextNode>) -> Option<DateTime<FixedOffset>> {
    let raw = node.as_ref()?.text.trim();
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| log::debug!("unparsable timestamp {raw:?}: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transformer() -> PostTransformer {
        PostTransformer::new(ThumbnailPipeline::standard(400, "placeholder"), 20)
    }

    #[test]
    fn test_full_entry() {
        let entry: Entry = serde_json::from_value(json!({
            "id": {"$t": "tag:blogger.com,1999:blog-1.post-9"},
            "title": {"$t": " Doa Pagi "},
            "published": {"$t": "2024-08-05T07:30:00.000+08:00"},
            "updated": {"$t": "2024-08-06T09:00:00.000+08:00"},
            "content": {"$t": "<p>Amalan doa pagi yang ringkas dan mudah diamalkan</p>"},
            "link": [{"rel": "alternate", "href": "https://x.test/doa.html"}],
            "author": [{"name": {"$t": "Aisyah"}}],
            "category": [{"term": "Doa"}, {"term": "Doa"}, {"term": "Zikir"}],
            "thr$total": {"$t": "4"}
        }))
        .unwrap();

        let post = transformer().transform(&entry);
        assert_eq!(post.title, "Doa Pagi");
        assert_eq!(post.url, "https://x.test/doa.html");
        assert_eq!(post.thumbnail, "placeholder");
        assert_eq!(post.excerpt, "Amalan doa pagi yang...");
        assert_eq!(post.published.unwrap().to_rfc3339(), "2024-08-05T07:30:00+08:00");
        assert_eq!(post.updated.unwrap().to_rfc3339(), "2024-08-06T09:00:00+08:00");
        assert_eq!(post.author, "Aisyah");
        assert_eq!(post.labels, vec!["Doa", "Zikir"]);
        assert_eq!(post.comments_count, 4);
    }

    #[test]
    fn test_empty_entry_uses_fallbacks() {
        let post = transformer().transform(&Entry::default());
        assert_eq!(post.title, UNTITLED);
        assert_eq!(post.url, "");
        assert_eq!(post.thumbnail, "placeholder");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.published, None);
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert!(post.labels.is_empty());
        assert_eq!(post.comments_count, 0);
    }

    #[test]
    fn test_bad_fields_degrade_individually() {
        let entry: Entry = serde_json::from_value(json!({
            "id": {"$t": "tag:blogger.com,1999:blog-1.post-3"},
            "title": {"$t": "Still here"},
            "published": {"$t": "yesterday"},
            "thr$total": {"$t": "many"}
        }))
        .unwrap();

        let post = transformer().transform(&entry);
        assert_eq!(post.title, "Still here");
        assert_eq!(post.url, "tag:blogger.com,1999:blog-1.post-3");
        assert_eq!(post.published, None);
        assert_eq!(post.updated, None);
        assert_eq!(post.comments_count, 0);
    }

    #[test]
    fn test_feed_order_is_preserved() {
        let doc: FeedDocument = serde_json::from_value(json!({"feed": {"entry": [
            {"title": {"$t": "one"}},
            {"title": {"$t": "two"}},
            {"title": {"$t": "three"}}
        ]}}))
        .unwrap();

        let titles: Vec<String> = transformer()
            .transform_feed(&doc)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }
}
