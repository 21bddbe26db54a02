#[cfg(test)]
mod tests {
    use super::*;

    // === extract_bracket_links ===

    #[test]
    fn extracts_simple_bracket_link() {
        let result = extract_bracket_links("[[Note]]");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target_name, "Note");
        assert_eq!(result[0].matched_text, "[[Note]]");
        assert_eq!(result[0].offset, 0);
        assert_eq!(result[0].kind, LinkKind::Bracket);
    }

    #[test]
    fn returns_empty_for_no_links() {
        assert!(extract_links("plain text").is_empty());
    }

    #[test]
    fn bracket_links_keep_source_order_and_offsets() {
        // "[[A]] then [[B]]" -> A at 0, B at 11
        let result = extract_bracket_links("[[A]] then [[B]]");
        let names: Vec<&str> = result.iter().map(|o| o.target_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(result[0].offset, 0);
        assert_eq!(result[1].offset, 11);
    }

    #[test]
    fn repeated_target_is_not_deduplicated() {
        let result = extract_bracket_links("[[Foo]] and again [[Foo]]");
        assert_eq!(result.len(), 2);
        assert!(result[0].offset < result[1].offset);
    }

    #[test]
    fn bracket_link_does_not_span_lines() {
        assert!(extract_bracket_links("[[Broken\nLink]]").is_empty());
    }

    #[test]
    fn ignores_empty_brackets() {
        assert!(extract_bracket_links("[[]]").is_empty());
    }

    #[test]
    fn keeps_namespaced_target_verbatim() {
        let result = extract_bracket_links("see [[Projects/Alpha]]");
        assert_eq!(result[0].target_name, "Projects/Alpha");
    }

    #[test]
    fn todo_marker_counts_as_bracket_link() {
        let result = extract_bracket_links("{{[[TODO]]}} write tests");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target_name, "TODO");
        assert_eq!(result[0].offset, 2);
    }

    #[test]
    fn offsets_are_byte_positions() {
        // "é" is two bytes
        let result = extract_bracket_links("é [[Foo]]");
        assert_eq!(result[0].offset, 3);
    }

    // === extract_attribute_links ===

    #[test]
    fn extracts_attribute_with_list_marker() {
        let result = extract_attribute_links("- Status:: open");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target_name, "Status");
        assert_eq!(result[0].matched_text, "- Status::");
        assert_eq!(result[0].kind, LinkKind::Attribute);
    }

    #[test]
    fn extracts_attribute_without_list_marker() {
        let result = extract_attribute_links("Status:: open");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target_name, "Status");
        assert_eq!(result[0].matched_text, "Status::");
    }

    #[test]
    fn indented_attribute_keeps_indent_in_match() {
        let result = extract_attribute_links("- parent\n    - Owner:: me");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target_name, "Owner");
        assert_eq!(result[0].matched_text, "    - Owner::");
        assert_eq!(result[0].offset, 9);
    }

    #[test]
    fn attribute_key_may_contain_single_colons() {
        let result = extract_attribute_links("- time: 10:30:: late");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target_name, "time: 10:30");
    }

    #[test]
    fn attribute_target_is_trimmed() {
        let result = extract_attribute_links("-  Spaced Key :: x");
        assert_eq!(result[0].target_name, "Spaced Key");
        assert_eq!(result[0].matched_text, "-  Spaced Key ::");
    }

    #[test]
    fn attribute_must_start_its_line() {
        assert!(extract_attribute_links("a [[x]] b\nnot a key: value").is_empty());
    }

    #[test]
    fn single_colon_is_not_an_attribute() {
        assert!(extract_attribute_links("- Status: open").is_empty());
    }

    // === extract_links ===

    #[test]
    fn bracket_links_precede_attribute_links() {
        let markdown = "- Status:: [[Open]]\n- Owner:: [[Me]]";
        let result = extract_links(markdown);
        let names: Vec<&str> = result.iter().map(|o| o.target_name.as_str()).collect();
        assert_eq!(names, vec!["Open", "Me", "Status", "Owner"]);
    }

    #[test]
    fn counts_every_well_formed_link() {
        let markdown = "[[A]] [[B]]\n- k1:: v\n[[C]]\n- k2:: v\n- k3:: [[A]]";
        let result = extract_links(markdown);
        let brackets = result.iter().filter(|o| o.kind == LinkKind::Bracket).count();
        let attributes = result.iter().filter(|o| o.kind == LinkKind::Attribute).count();
        assert_eq!(brackets, 4);
        assert_eq!(attributes, 3);
        assert_eq!(result.len(), 7);
    }
}

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Compile regexes once, reuse across calls
pub(crate) static BRACKET_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]\n]+)\]\]").unwrap());

/// Line start, optional indent and `- ` marker, then a key up to the first `::`.
pub(crate) static ATTRIBUTE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^( *(?:- )?)((?:[^:\n]|:[^:\n])+)::").unwrap());

/// Which syntax produced a link occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `[[Name]]`
    Bracket,
    /// `Key:: value` property line
    Attribute,
}

/// One reference from a note to another note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOccurrence {
    pub kind: LinkKind,
    /// Human-readable target, without the `.md` suffix.
    pub target_name: String,
    /// The full matched span in the source, e.g. `[[Foo]]` or `- Key::`.
    pub matched_text: String,
    /// Byte offset of the match in the note's original content.
    ///
    /// Only meaningful for ordering occurrences of the same note; never slice
    /// with it after the content has been rewritten.
    pub offset: usize,
}

/// Extract every `[[Name]]` occurrence, left to right.
pub fn extract_bracket_links(markdown: &str) -> Vec<LinkOccurrence> {
    BRACKET_LINK_RE
        .captures_iter(markdown)
        .filter_map(|cap| {
            let full_match = cap.get(0)?;
            Some(LinkOccurrence {
                kind: LinkKind::Bracket,
                target_name: cap[1].to_string(),
                matched_text: full_match.as_str().to_string(),
                offset: full_match.start(),
            })
        })
        .collect()
}

/// Extract every `Key::` property line, left to right.
/// The key is trimmed to form the target name; the matched text keeps the
/// indent and list marker.
pub fn extract_attribute_links(markdown: &str) -> Vec<LinkOccurrence> {
    ATTRIBUTE_LINK_RE
        .captures_iter(markdown)
        .filter_map(|cap| {
            let full_match = cap.get(0)?;
            let target_name = cap[2].trim();
            if target_name.is_empty() {
                return None;
            }
            Some(LinkOccurrence {
                kind: LinkKind::Attribute,
                target_name: target_name.to_string(),
                matched_text: full_match.as_str().to_string(),
                offset: full_match.start(),
            })
        })
        .collect()
}

/// Extract all link occurrences of a note: bracket links first, then attribute
/// links, each pass in source order. Duplicates are kept.
pub fn extract_links(markdown: &str) -> Vec<LinkOccurrence> {
    let mut occurrences = extract_bracket_links(markdown);
    occurrences.extend(extract_attribute_links(markdown));
    occurrences
}
