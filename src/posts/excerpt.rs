use once_cell::sync::Lazy;
use regex::Regex;

pub const ELLIPSIS: &str = "...";

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static ELLIPSIS_ARTIFACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\.\.\.\]|\[…\]|\.\.\.|…").expect("valid regex"));

const ENTITIES: [(&str, &str); 7] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#039;", "'"),
    // last so `&amp;lt;` stays literal
    ("&amp;", "&"),
];

/// Plain text of an html fragment with whitespace collapsed.
pub fn clean_text(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, " ");
    let text = STYLE_BLOCK.replace_all(&text, " ");
    let text = TAG.replace_all(&text, " ");
    let mut text = text.into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    let text = ELLIPSIS_ARTIFACT.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Cleaned text cut to `budget` characters. A cut excerpt ends with `...`.
pub fn excerpt(html: &str, budget: usize) -> String {
    let text = clean_text(html);
    truncate(&text, budget)
}

fn truncate(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markup_and_blocks() {
        let html = r#"<style>p { color: red }</style><p>Hello&nbsp;<b>dunia</b></p>
            <SCRIPT type="text/javascript">var a = "<p>";</SCRIPT><div>selamat</div>"#;
        assert_eq!(clean_text(html), "Hello dunia selamat");
    }

    #[test]
    fn test_removes_ellipsis_artifacts() {
        assert_eq!(clean_text("Bacaan doa [...] dan zikir... seterusnya…"), "Bacaan doa dan zikir seterusnya");
    }

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(excerpt("<p>short</p>", 150), "short");
        assert_eq!(excerpt("", 150), "");
    }

    #[test]
    fn test_truncated_excerpt_is_bounded_prefix() {
        let html = format!("<p>{}</p>", "kata ".repeat(80));
        let cleaned = clean_text(&html);
        let out = excerpt(&html, 150);

        assert!(out.ends_with(ELLIPSIS));
        assert!(out.chars().count() <= 150 + ELLIPSIS.len());
        let body = out.trim_end_matches(ELLIPSIS);
        assert!(cleaned.starts_with(body));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let out = excerpt("ééééé", 3);
        assert_eq!(out, "ééé...");
    }

    #[test]
    fn test_entities_decode_once() {
        assert_eq!(clean_text("a &amp;lt; b &amp; c"), "a &lt; b & c");
    }
}
