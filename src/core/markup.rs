//! Markup boundary for backend-supplied content.
//!
//! Persona values and chat replies may carry HTML fragments. The terminal
//! never interprets them: tags are removed, entities are decoded, and every
//! other character is kept literally. Markdown punctuation, list markers
//! and bare `<`/`>` comparisons pass through untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};

/// Elements whose content is never shown.
static HIDDEN_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("hidden element pattern is valid")
});

/// `<br>` and the closing tags of block elements end a line.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6]|tr|blockquote|pre)\s*>")
        .expect("line break pattern is valid")
});

/// Comments and tags. A `<` not followed by a letter, `/` or `!` is text.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[/!]?[A-Za-z][^<>]*>").expect("tag pattern is valid")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("entity pattern is valid")
});

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"));

/// Reduce an HTML fragment to the plain text a reader would see.
///
/// Tags disappear, `<br>` and block ends become newlines, entities are
/// decoded and control characters (other than newline and tab) are removed.
pub fn to_plain_text(content: &str) -> String {
    let visible = HIDDEN_ELEMENT.replace_all(content, "");
    let broken = LINE_BREAK.replace_all(&visible, "\n");
    let untagged = TAG.replace_all(&broken, "");
    let decoded = decode_entities(&untagged);

    let cleaned: String = decoded
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let lines: Vec<&str> = cleaned.lines().map(str::trim_end).collect();

    BLANK_RUN.replace_all(&lines.join("\n"), "\n\n").trim().to_string()
}

/// Decode named and numeric character references. Unknown or invalid
/// references stay as written.
fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures| {
        let reference = &caps[0];
        unescape_with(reference, resolve_html5_entity)
            .map(Cow::into_owned)
            .unwrap_or_else(|_| reference.to_string())
    })
}
