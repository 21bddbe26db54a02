use crate::link_indexer::BackLink;

/// Heading that opens the generated section.
pub const BACKLINKS_HEADING: &str = "# Backlinks";

/// Strip the `.md` suffix from a note key to get its display name.
pub fn note_name(note_key: &str) -> &str {
    note_key.strip_suffix(".md").unwrap_or(note_key)
}

/// Append a "Backlinks" section listing every incoming link.
///
/// Entries are sorted by (source name, offset) and grouped under one
/// `## [source](<source.md>)` heading per source note, so the output does not
/// depend on the order notes were indexed in. Each entry is the trimmed
/// matched text followed by an empty line. With no backlinks the content is
/// returned unchanged.
pub fn append_backlinks(content: &str, backlinks: Option<&[BackLink]>) -> String {
    let backlinks = match backlinks {
        Some(backlinks) if !backlinks.is_empty() => backlinks,
        _ => return content.to_string(),
    };

    let mut entries: Vec<(&str, &BackLink)> = backlinks
        .iter()
        .map(|link| (note_name(&link.source_key), link))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0).then(a.1.occurrence.offset.cmp(&b.1.occurrence.offset)));

    let mut lines: Vec<String> = Vec::new();
    let mut previous_source: Option<&str> = None;
    for (source, link) in entries {
        if previous_source != Some(source) {
            lines.push(format!("## [{source}](<{source}.md>)"));
        }
        previous_source = Some(source);
        lines.push(link.occurrence.matched_text.trim().to_string());
        lines.push(String::new());
    }

    format!("{}\n{}\n{}\n", content, BACKLINKS_HEADING, lines.join("\n"))
}
