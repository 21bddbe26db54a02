use anyhow::{anyhow, Result};
use notegraph_core::link_indexer::target_key;
use notegraph_core::{extract_links, BackLink, BackLinkIndex, LinkOccurrence, NoteCollection};
use serde::Serialize;

/// Incoming and outgoing links of a single note.
#[derive(Debug, Serialize)]
pub struct LinkReport {
    pub note_key: String,
    pub backlinks: Vec<BackLink>,
    pub forward_links: Vec<LinkOccurrence>,
}

/// Accept `Home` as well as `Home.md`.
fn resolve_key<'a>(notes: &'a NoteCollection, requested: &str) -> Option<&'a str> {
    notes
        .get_key_value(requested)
        .or_else(|| notes.get_key_value(&target_key(requested)))
        .map(|(key, _)| key.as_str())
}

/// Collect backlinks and forward links for `requested` from the original
/// note contents.
pub fn build_report(
    notes: &NoteCollection,
    index: &BackLinkIndex,
    requested: &str,
) -> Result<LinkReport> {
    let note_key = resolve_key(notes, requested)
        .ok_or_else(|| anyhow!("Note not found: {}", requested))?;

    let mut backlinks = index.get(note_key).map(<[BackLink]>::to_vec).unwrap_or_default();
    backlinks.sort_by(|a, b| {
        a.source_key
            .cmp(&b.source_key)
            .then(a.occurrence.offset.cmp(&b.occurrence.offset))
    });

    Ok(LinkReport {
        note_key: note_key.to_string(),
        backlinks,
        forward_links: extract_links(&notes[note_key]),
    })
}

/// Render the report as plain text: one line per linking note and per
/// linked target, each listed once.
pub fn render_report(report: &LinkReport) -> String {
    let mut sources: Vec<&str> = report.backlinks.iter().map(|b| b.source_key.as_str()).collect();
    sources.dedup();

    let mut targets: Vec<String> = report
        .forward_links
        .iter()
        .map(|o| target_key(&o.target_name))
        .collect();
    targets.sort();
    targets.dedup();

    let mut output = String::new();
    output.push_str("Backlinks (notes linking to this):\n");
    if sources.is_empty() {
        output.push_str("- (none)\n");
    } else {
        for source in &sources {
            output.push_str(&format!("- {}\n", source));
        }
    }

    output.push_str("\nForward links (notes this links to):\n");
    if targets.is_empty() {
        output.push_str("- (none)\n");
    } else {
        for target in &targets {
            output.push_str(&format!("- {}\n", target));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(entries: &[(&str, &str)]) -> NoteCollection {
        entries
            .iter()
            .map(|(key, content)| (key.to_string(), content.to_string()))
            .collect()
    }

    fn graph() -> NoteCollection {
        notes(&[
            ("Home.md", "See [[Project]] and [[Project]]\n- Status:: open"),
            ("Project.md", "back to [[Home]]"),
            ("Log.md", "[[Project]]"),
        ])
    }

    #[test]
    fn report_lists_backlinks_and_forward_links() {
        let notes = graph();
        let index = BackLinkIndex::build(&notes);
        let report = build_report(&notes, &index, "Project.md").unwrap();

        assert_eq!(report.backlinks.len(), 3);
        assert_eq!(report.backlinks[0].source_key, "Home.md");
        assert_eq!(
            render_report(&report),
            "Backlinks (notes linking to this):\n- Home.md\n- Log.md\n\n\
             Forward links (notes this links to):\n- Home.md\n"
        );
    }

    #[test]
    fn accepts_name_without_extension() {
        let notes = graph();
        let index = BackLinkIndex::build(&notes);
        let report = build_report(&notes, &index, "Home").unwrap();
        assert_eq!(report.note_key, "Home.md");
        let text = render_report(&report);
        assert!(text.contains("- Project.md\n- Status.md\n"), "{text}");
    }

    #[test]
    fn unlinked_note_reports_none() {
        let notes = notes(&[("Alone.md", "nothing here")]);
        let index = BackLinkIndex::build(&notes);
        let report = build_report(&notes, &index, "Alone.md").unwrap();
        assert_eq!(
            render_report(&report),
            "Backlinks (notes linking to this):\n- (none)\n\n\
             Forward links (notes this links to):\n- (none)\n"
        );
    }

    #[test]
    fn unknown_note_is_an_error() {
        let notes = graph();
        let index = BackLinkIndex::build(&notes);
        assert!(build_report(&notes, &index, "Missing").is_err());
    }

    #[test]
    fn report_serializes_to_json() {
        let notes = graph();
        let index = BackLinkIndex::build(&notes);
        let report = build_report(&notes, &index, "Home.md").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["backlinks"][0]["source_key"], "Project.md");
        assert_eq!(json["forward_links"][2]["kind"], "attribute");
        assert_eq!(json["forward_links"][2]["target_name"], "Status");
    }
}
