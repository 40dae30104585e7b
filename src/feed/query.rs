use serde::{Deserialize, Serialize};
use url::Url;

use super::FeedError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedKind {
    /// Entries carry `summary` only. Cheap, used for scanning labels.
    Summary,
    /// Entries carry full `content`.
    Default,
}

impl FeedKind {
    fn segment(self) -> &'static str {
        match self {
            FeedKind::Summary => "summary",
            FeedKind::Default => "default",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub kind: FeedKind,
    pub label: Option<String>,
    pub max_results: u32,
    pub order_by_published: bool,
}

impl FeedQuery {
    pub fn label_scan(max_results: u32) -> Self {
        Self {
            kind: FeedKind::Summary,
            label: None,
            max_results,
            order_by_published: false,
        }
    }

    pub fn recent(max_results: u32) -> Self {
        Self {
            kind: FeedKind::Default,
            label: None,
            max_results,
            order_by_published: true,
        }
    }

    pub fn for_label(label: impl Into<String>, max_results: u32) -> Self {
        Self {
            kind: FeedKind::Default,
            label: Some(label.into()),
            max_results,
            order_by_published: false,
        }
    }

    /// `{blog}/feeds/posts/{kind}[/-/{label}]?alt=json&max-results=N[&orderby=published]`
    pub fn to_url(&self, blog_url: &str) -> Result<Url, FeedError> {
        let mut path = format!(
            "{}/feeds/posts/{}",
            blog_url.trim_end_matches('/'),
            self.kind.segment()
        );
        if let Some(label) = &self.label {
            path.push_str("/-/");
            path.push_str(&urlencoding::encode(label));
        }

        let mut url = Url::parse(&path).map_err(|e| FeedError::InvalidUrl(format!("{path}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("alt", "json");
            pairs.append_pair("max-results", &self.max_results.to_string());
            if self.order_by_published {
                pairs.append_pair("orderby", "published");
            }
        }
        Ok(url)
    }
}
