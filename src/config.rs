use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BLOG_URL: &str = "https://www.ilmualam.com";

pub const DEFAULT_THUMBNAIL: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"300\" viewBox=\"0 0 400 300\"%3E%3Crect width=\"400\" height=\"300\" fill=\"%23f0f0f0\"/%3E%3Ctext x=\"50%25\" y=\"50%25\" text-anchor=\"middle\" dy=\".3em\" fill=\"%23999\" font-family=\"Inter\" font-size=\"16\"%3ENo Image%3C/text%3E%3C/svg%3E";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
    #[error("blog url is not a valid absolute url: {0}")]
    BlogUrl(String),
}

/// Settings used on the server side to query and normalize the feed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    pub blog_url: String,
    pub posts_per_label: u32,
    pub recent_posts: u32,
    pub label_scan_results: u32,
    pub max_labels: usize,
    pub image_size: u32,
    pub excerpt_length: usize,
    pub request_timeout_secs: u64,
    pub placeholder_thumbnail: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            blog_url: DEFAULT_BLOG_URL.to_string(),
            posts_per_label: 30,
            recent_posts: 25,
            label_scan_results: 150,
            max_labels: 25,
            image_size: 400,
            excerpt_length: 150,
            request_timeout_secs: 10,
            placeholder_thumbnail: DEFAULT_THUMBNAIL.to_string(),
        }
    }
}

const DEFAULT_LABEL_ICONS: [(&str, &str); 19] = [
    ("Islamik", "🕌"),
    ("Doa", "🤲🏻"),
    ("Al-Quran", "📖"),
    ("Motivasi", "ﷺ"),
    ("Surah", "📄"),
    ("Zikir", "📿"),
    ("Qasidah", "👨🏼‍💻"),
    ("Hukum", "🕋"),
    ("Inspirasi", "💡"),
    ("Ramadan", "✨"),
    ("Waktu Solat", "🕗"),
    ("Solat", "🛐"),
    ("Panduan", "📝"),
    ("Kisah Nabi", "🏜️"),
    ("Feqah", "🍳"),
    ("Akhlak", "👳‍♂️"),
    ("Fardhu Ain", "📚"),
    ("Iqra", "📜"),
    ("Mari Mengaji", "📕"),
];

/// Icons for the default blog's categories. `SITEMAP_LABEL_ICONS` replaces
/// the whole table.
pub fn default_label_icons() -> Vec<(String, String)> {
    DEFAULT_LABEL_ICONS
        .iter()
        .map(|(label, icon)| (label.to_string(), icon.to_string()))
        .collect()
}

/// Settings the widget needs in the browser. Shipped to the client either by
/// the `get_widget_settings` server function or by the embedding page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WidgetSettings {
    pub blog_url: String,
    pub site_name: String,
    pub all_posts_title: String,
    pub language: String,
    pub page_size: usize,
    pub eager_images: usize,
    pub cache_expiry_secs: i64,
    pub image_size: u32,
    pub placeholder_thumbnail: String,
    /// Absolute url of the page hosting the widget, used for the
    /// CollectionPage node. Falls back to `blog_url`.
    pub page_url: Option<String>,
    pub label_icons: Vec<(String, String)>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            blog_url: DEFAULT_BLOG_URL.to_string(),
            site_name: "Ilmu Alam".to_string(),
            all_posts_title: "Recent Posts".to_string(),
            language: "ms-MY".to_string(),
            page_size: 10,
            eager_images: 5,
            cache_expiry_secs: 3600,
            image_size: 400,
            placeholder_thumbnail: DEFAULT_THUMBNAIL.to_string(),
            page_url: None,
            label_icons: default_label_icons(),
        }
    }
}

impl WidgetSettings {
    pub fn page_url(&self) -> &str {
        self.page_url.as_deref().unwrap_or(&self.blog_url)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SitemapConfig {
    pub feed: FeedConfig,
    pub widget: WidgetSettings,
}

impl SitemapConfig {
    /// Reads `SITEMAP_*` variables over the defaults. Call `dotenv()` first if
    /// a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SitemapConfig::default();
        let feed = &mut config.feed;
        let widget = &mut config.widget;

        if let Some(url) = lookup("SITEMAP_BLOG_URL") {
            let url = url.trim_end_matches('/').to_string();
            feed.blog_url = url.clone();
            widget.blog_url = url;
        }
        parse_into(&lookup, "SITEMAP_POSTS_PER_LABEL", &mut feed.posts_per_label)?;
        parse_into(&lookup, "SITEMAP_RECENT_POSTS", &mut feed.recent_posts)?;
        parse_into(&lookup, "SITEMAP_LABEL_SCAN_RESULTS", &mut feed.label_scan_results)?;
        parse_into(&lookup, "SITEMAP_MAX_LABELS", &mut feed.max_labels)?;
        parse_into(&lookup, "SITEMAP_EXCERPT_LENGTH", &mut feed.excerpt_length)?;
        parse_into(&lookup, "SITEMAP_REQUEST_TIMEOUT_SECS", &mut feed.request_timeout_secs)?;
        parse_into(&lookup, "SITEMAP_IMAGE_SIZE", &mut feed.image_size)?;
        widget.image_size = feed.image_size;

        if let Some(thumb) = lookup("SITEMAP_PLACEHOLDER_THUMBNAIL") {
            feed.placeholder_thumbnail = thumb.clone();
            widget.placeholder_thumbnail = thumb;
        }
        if let Some(name) = lookup("SITEMAP_SITE_NAME") {
            widget.site_name = name;
        }
        if let Some(title) = lookup("SITEMAP_ALL_POSTS_TITLE") {
            widget.all_posts_title = title;
        }
        if let Some(language) = lookup("SITEMAP_LANGUAGE") {
            widget.language = language;
        }
        parse_into(&lookup, "SITEMAP_PAGE_SIZE", &mut widget.page_size)?;
        parse_into(&lookup, "SITEMAP_EAGER_IMAGES", &mut widget.eager_images)?;
        parse_into(&lookup, "SITEMAP_CACHE_EXPIRY_SECS", &mut widget.cache_expiry_secs)?;
        if let Some(icons) = lookup("SITEMAP_LABEL_ICONS") {
            widget.label_icons = parse_label_icons(&icons);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.feed.blog_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => return Err(ConfigError::BlogUrl(self.feed.blog_url.clone())),
        }

        let non_zero: [(&'static str, u64); 7] = [
            ("SITEMAP_POSTS_PER_LABEL", self.feed.posts_per_label.into()),
            ("SITEMAP_RECENT_POSTS", self.feed.recent_posts.into()),
            ("SITEMAP_LABEL_SCAN_RESULTS", self.feed.label_scan_results.into()),
            ("SITEMAP_IMAGE_SIZE", self.feed.image_size.into()),
            ("SITEMAP_REQUEST_TIMEOUT_SECS", self.feed.request_timeout_secs),
            ("SITEMAP_PAGE_SIZE", self.widget.page_size as u64),
            ("SITEMAP_EXCERPT_LENGTH", self.feed.excerpt_length as u64),
        ];
        if let Some((key, _)) = non_zero.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Zero { key });
        }
        if self.widget.cache_expiry_secs <= 0 {
            return Err(ConfigError::Zero { key: "SITEMAP_CACHE_EXPIRY_SECS" });
        }
        Ok(())
    }
}

fn parse_into<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.clone(),
        })?;
    }
    Ok(())
}

/// Parses `Label=icon,Other=icon` pairs. Malformed pairs are skipped.
pub fn parse_label_icons(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (label, icon) = pair.split_once('=')?;
            let (label, icon) = (label.trim(), icon.trim());
            (!label.is_empty() && !icon.is_empty()).then(|| (label.to_string(), icon.to_string()))
        })
        .collect()
}
