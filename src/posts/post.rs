use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A feed entry normalized for display. Identity is the url.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub excerpt: String,
    pub published: Option<DateTime<FixedOffset>>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub author: String,
    pub labels: Vec<String>,
    pub comments_count: u32,
}

impl Post {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// What the widget is currently showing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Newest posts across every label.
    Recent,
    Label(String),
}

impl Selection {
    pub fn label(&self) -> Option<&str> {
        match self {
            Selection::Recent => None,
            Selection::Label(name) => Some(name),
        }
    }
}
