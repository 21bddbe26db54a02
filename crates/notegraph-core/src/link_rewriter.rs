use crate::link_parser::BRACKET_LINK_RE;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_-]+)").unwrap());

/// Same grammar as the attribute extractor, but also swallows the spaces
/// after `::` so the value sits directly against the closing bold markers.
/// The regex crate has no lookahead, so keys that are already rewritten are
/// filtered in [`rewrite_attribute_line`].
static ATTRIBUTE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^( *(?:- )?)((?:[^:\n]|:[^:\n])+):: *").unwrap());

static TODO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\[\[TODO\]\]\}\} *").unwrap());

static DONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\[\[DONE\]\]\}\} *").unwrap());

/// Every rewritten attribute key starts with this.
const REWRITTEN_KEY_OPENER: &str = "**[";

/// Number of `/` separators in a note key.
pub fn namespace_depth(note_key: &str) -> usize {
    note_key.matches('/').count()
}

/// Relative prefix that climbs from a note back to the collection root.
///
/// Link targets are always root-relative by name, so only the referencing
/// note's own depth is compensated.
///
/// Examples:
/// - `"Home.md"` → `""`
/// - `"a/b/c.md"` → `"../../"`
pub fn link_prefix(note_key: &str) -> String {
    "../".repeat(namespace_depth(note_key))
}

/// Replace the TODO/DONE block markers with markdown checkboxes.
pub fn format_checkboxes(markdown: &str) -> String {
    let open = TODO_RE.replace_all(markdown, "[ ] ");
    DONE_RE.replace_all(&open, "[x] ").into_owned()
}

/// Rewrite bracket links, tags and attribute keys into relative markdown links.
///
/// Passes run in a fixed order: `[[name]]`, then `#tag`, then `key::` lines.
/// Rewriting already-rewritten text leaves it unchanged.
pub fn rewrite_links(markdown: &str, link_prefix: &str) -> String {
    let bracketed = BRACKET_LINK_RE.replace_all(markdown, |cap: &Captures| {
        let name = &cap[1];
        format!("[{name}](<{link_prefix}{name}.md>)")
    });
    let tagged = TAG_RE.replace_all(&bracketed, |cap: &Captures| {
        let tag = &cap[1];
        format!("[{tag}](<{link_prefix}{tag}.md>)")
    });
    ATTRIBUTE_LINE_RE
        .replace_all(&tagged, |cap: &Captures| rewrite_attribute_line(cap, link_prefix))
        .into_owned()
}

/// A line already turned into `**[key](<key.md>)**:**value` still fits the
/// attribute grammar when the value holds another `::`; such a line is kept
/// as it is.
fn rewrite_attribute_line(cap: &Captures, link_prefix: &str) -> String {
    let marker = &cap[1];
    let key = &cap[2];
    if key.trim_start().starts_with(REWRITTEN_KEY_OPENER) {
        return cap[0].to_string();
    }
    format!("{marker}**[{key}](<{link_prefix}{}.md>)**:**", key.trim())
}
