use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Root of a Blogger `alt=json` response.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedDocument {
    #[serde(default)]
    pub feed: Feed,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<TextNode>,
    #[serde(rename = "openSearch$totalResults", default, deserialize_with = "lenient")]
    pub total_results: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub entry: Vec<Entry>,
}

impl FeedDocument {
    pub fn entries(&self) -> &[Entry] {
        &self.feed.entry
    }

    /// Total number of matching posts reported by the feed, which may exceed
    /// the number of entries returned.
    pub fn total_results(&self) -> Option<u64> {
        self.feed
            .total_results
            .as_ref()
            .and_then(|node| node.text.trim().parse().ok())
    }
}

/// The `{"$t": "..."}` wrapper Blogger uses for every scalar.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TextNode {
    #[serde(rename = "$t", default, deserialize_with = "lenient_text")]
    pub text: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Link {
    #[serde(default)]
    pub rel: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<TextNode>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub term: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaThumbnail {
    #[serde(default)]
    pub url: String,
}

/// One post as delivered by the feed. Every field is optional: a missing or
/// oddly shaped field deserializes to `None` instead of failing the entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub published: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<TextNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<Vec<Link>>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<Vec<Author>>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<Vec<Category>>,
    #[serde(rename = "media$thumbnail", default, deserialize_with = "lenient")]
    pub media_thumbnail: Option<MediaThumbnail>,
    #[serde(rename = "thr$total", default, deserialize_with = "lenient")]
    pub total_comments: Option<TextNode>,
}

impl Entry {
    pub fn title(&self) -> Option<&str> {
        text_of(&self.title)
    }

    /// Full content when present, otherwise the summary.
    pub fn body(&self) -> &str {
        text_of(&self.content)
            .or_else(|| text_of(&self.summary))
            .unwrap_or("")
    }

    pub fn alternate_url(&self) -> Option<&str> {
        self.link
            .as_deref()?
            .iter()
            .find(|link| link.rel == "alternate" && !link.href.is_empty())
            .map(|link| link.href.as_str())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_deref()?
            .first()
            .and_then(|author| text_of(&author.name))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.category
            .iter()
            .flatten()
            .map(|category| category.term.trim())
            .filter(|term| !term.is_empty())
    }
}

fn text_of(node: &Option<TextNode>) -> Option<&str> {
    node.as_ref()
        .map(|node| node.text.as_str())
        .filter(|text| !text.trim().is_empty())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Entry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable feed entry: {e}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_blogger_entry() {
        let doc: FeedDocument = serde_json::from_value(json!({
            "feed": {
                "openSearch$totalResults": {"$t": "42"},
                "entry": [{
                    "id": {"$t": "tag:blogger.com,1999:blog-1.post-2"},
                    "title": {"type": "text", "$t": "Doa Pagi"},
                    "published": {"$t": "2024-08-05T07:30:00.000+08:00"},
                    "link": [
                        {"rel": "replies", "href": "https://x.test/feeds/2/comments"},
                        {"rel": "alternate", "href": "https://x.test/2024/08/doa.html"}
                    ],
                    "author": [{"name": {"$t": "Aisyah"}}],
                    "category": [{"term": "Doa"}, {"term": " "}],
                    "media$thumbnail": {"url": "https://x.test/s72-c/a.jpg", "height": "72"},
                    "thr$total": {"$t": "3"}
                }]
            }
        }))
        .unwrap();

        assert_eq!(doc.total_results(), Some(42));
        let entry = &doc.entries()[0];
        assert_eq!(entry.title(), Some("Doa Pagi"));
        assert_eq!(entry.alternate_url(), Some("https://x.test/2024/08/doa.html"));
        assert_eq!(entry.author_name(), Some("Aisyah"));
        assert_eq!(entry.terms().collect::<Vec<_>>(), vec!["Doa"]);
        assert_eq!(entry.total_comments.as_ref().unwrap().text, "3");
    }

    #[test]
    fn test_malformed_fields_become_absent() {
        let doc: FeedDocument = serde_json::from_value(json!({
            "feed": {
                "entry": [{
                    "title": "not a text node",
                    "link": {"rel": "alternate"},
                    "category": [{"term": "A"}],
                    "thr$total": {"$t": 7}
                }]
            }
        }))
        .unwrap();

        let entry = &doc.entries()[0];
        assert_eq!(entry.title(), None);
        assert_eq!(entry.alternate_url(), None);
        assert_eq!(entry.terms().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(entry.total_comments.as_ref().unwrap().text, "7");
    }

    #[test]
    fn test_missing_entry_list_is_empty() {
        let doc: FeedDocument = serde_json::from_value(json!({"feed": {"title": {"$t": "Blog"}}})).unwrap();
        assert!(doc.entries().is_empty());

        let doc: FeedDocument = serde_json::from_value(json!({"feed": {"entry": null}})).unwrap();
        assert!(doc.entries().is_empty());
    }

    #[test]
    fn test_body_prefers_content_over_summary() {
        let entry: Entry = serde_json::from_value(json!({
            "content": {"$t": "<p>full</p>"},
            "summary": {"$t": "short"}
        }))
        .unwrap();
        assert_eq!(entry.body(), "<p>full</p>");

        let entry: Entry = serde_json::from_value(json!({"summary": {"$t": "short"}})).unwrap();
        assert_eq!(entry.body(), "short");
    }
}
