use once_cell::sync::Lazy;
use regex::Regex;

use crate::feed::Entry;

static BLOGGER_SIZE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/s\d+(-c)?(-[a-z]+)?/").expect("valid regex"));
static BLOGGER_SIZE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"=s\d+(-c)?(-[a-z]+)?$").expect("valid regex"));
static IMGUR_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif)$").expect("valid regex"));

static INLINE_IMAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)<img[^>]+src=["']([^"']+)["']"#,
        r#"(?i)<img[^>]+data-src=["']([^"']+)["']"#,
        r"(?i)\[img\]([^\[]+)\[/img\]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

static YOUTUBE_EMBED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/embed/|youtu\.be/)([^"&?/\s]{11})"#).expect("valid regex")
});

/// Rewrites image urls from known hosts to the card's target size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSizer {
    pub width: u32,
}

impl ImageSizer {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// 4:3 card aspect.
    pub fn height(&self) -> u32 {
        (f64::from(self.width) * 0.75).round() as u32
    }

    pub fn normalize(&self, url: &str) -> String {
        if url.contains("blogspot.com") || url.contains("googleusercontent.com") {
            let size = format!("w{}-h{}-c", self.width, self.height());
            if BLOGGER_SIZE_SEGMENT.is_match(url) {
                return BLOGGER_SIZE_SEGMENT
                    .replace(url, format!("/{size}/").as_str())
                    .into_owned();
            }
            return BLOGGER_SIZE_SUFFIX
                .replace(url, format!("={size}").as_str())
                .into_owned();
        }
        if url.contains("imgur.com") {
            return IMGUR_EXTENSION.replace(url, "l.$1").into_owned();
        }
        url.to_string()
    }
}

/// A single way of finding a thumbnail for an entry.
pub trait ThumbnailExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// `body` is the entry's content, or its summary when content is absent.
    fn try_extract(&self, entry: &Entry, body: &str) -> Option<String>;
}

/// `media$thumbnail`, which Blogger fills with a 72px crop.
pub struct MediaThumbnailExtractor {
    pub sizer: ImageSizer,
}

impl ThumbnailExtractor for MediaThumbnailExtractor {
    fn name(&self) -> &'static str {
        "media-thumbnail"
    }

    fn try_extract(&self, entry: &Entry, _body: &str) -> Option<String> {
        entry
            .media_thumbnail
            .as_ref()
            .map(|thumb| thumb.url.trim())
            .filter(|url| !url.is_empty())
            .map(|url| self.sizer.normalize(url))
    }
}

/// First image in the post body: `<img src>`, then lazy-load `data-src`,
/// then the `[img]...[/img]` bracket convention.
pub struct InlineImageExtractor {
    pub sizer: ImageSizer,
}

impl ThumbnailExtractor for InlineImageExtractor {
    fn name(&self) -> &'static str {
        "inline-image"
    }

    fn try_extract(&self, _entry: &Entry, body: &str) -> Option<String> {
        INLINE_IMAGE_PATTERNS.iter().find_map(|pattern| {
            pattern
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|url| !url.is_empty())
                .map(|url| self.sizer.normalize(url))
        })
    }
}

/// Poster frame of an embedded YouTube video.
pub struct VideoEmbedExtractor;

impl ThumbnailExtractor for VideoEmbedExtractor {
    fn name(&self) -> &'static str {
        "video-embed"
    }

    fn try_extract(&self, _entry: &Entry, body: &str) -> Option<String> {
        YOUTUBE_EMBED
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|id| format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id.as_str()))
    }
}

/// Ordered extractors with a fixed placeholder as the last resort.
pub struct ThumbnailPipeline {
    extractors: Vec<Box<dyn ThumbnailExtractor>>,
    placeholder: String,
}

impl ThumbnailPipeline {
    pub fn new(extractors: Vec<Box<dyn ThumbnailExtractor>>, placeholder: impl Into<String>) -> Self {
        Self {
            extractors,
            placeholder: placeholder.into(),
        }
    }

    pub fn standard(image_size: u32, placeholder: impl Into<String>) -> Self {
        let sizer = ImageSizer::new(image_size);
        Self::new(
            vec![
                Box::new(MediaThumbnailExtractor { sizer }),
                Box::new(InlineImageExtractor { sizer }),
                Box::new(VideoEmbedExtractor),
            ],
            placeholder,
        )
    }

    pub fn extract(&self, entry: &Entry) -> String {
        let body = entry.body();
        for extractor in &self.extractors {
            if let Some(url) = extractor.try_extract(entry, body) {
                log::trace!("thumbnail from {}: {url}", extractor.name());
                return url;
            }
        }
        self.placeholder.clone()
    }
}
