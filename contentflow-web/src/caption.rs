//! Caption pipeline for the image modal: raw `data-caption` text in,
//! renderable HTML out. Everything here is pure.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;

/// Hashtag link prefix used when the page does not configure one
pub const DEFAULT_TAG_URL_BASE: &str = "/posts/tag/";

/// Matches: #word where word is one or more Unicode letters, digits or underscores
static HASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\w+)").expect("Failed to compile hashtag regex"));

static TRAILING_BREAKS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[\n\r]|<br\s*/?>)+$").expect("Failed to compile trailing break regex")
});

static LINE_ENDING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r").expect("Failed to compile line ending regex"));

static BREAKS_BEFORE_LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:<br\s*/?>)+(<a )").expect("Failed to compile break-before-link regex")
});

/// Decode backslash and `\uXXXX` escapes by reading the text as the body of
/// a JSON string literal. Text that is not a valid literal body is returned
/// unchanged; that includes an unpaired surrogate such as `\ud83d`.
pub fn decode_escapes(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}

/// Drop any run of `\n`, `\r` or `<br>` markup at the end of the text
pub fn strip_trailing_breaks(text: &str) -> String {
    TRAILING_BREAKS_REGEX.replace(text, "").into_owned()
}

/// Turn every line ending (`\r\n`, `\r`, `\n`) into `<br>`
pub fn preserve_line_breaks(text: &str) -> String {
    LINE_ENDING_REGEX.replace_all(text, "\n").replace('\n', "<br>")
}

/// Replace hashtags with links to their tag page.
///
/// Only the first occurrence of a tag is linked; later occurrences of the
/// exact same tag are removed.
pub fn linkify_hashtags(text: &str, tag_base: &str) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    HASHTAG_REGEX
        .replace_all(text, |caps: &Captures| {
            let tag = &caps[1];
            if !seen.insert(tag.to_string()) {
                return String::new();
            }
            format!(
                r#"<a href="{}{}" class="post-tag">#{}</a>"#,
                tag_base,
                urlencoding::encode(tag),
                tag
            )
        })
        .into_owned()
}

/// Full pipeline from a raw caption to the caption region's HTML
pub fn render_caption(raw: &str, tag_base: &str) -> String {
    let decoded = strip_trailing_breaks(&decode_escapes(raw));
    let html = linkify_hashtags(&preserve_line_breaks(&decoded), tag_base);
    BREAKS_BEFORE_LINK_REGEX.replace(&html, "$1").into_owned()
}
