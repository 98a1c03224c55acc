use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use docstage_core::{ErrorKind, StagingConfig};
use docstage_retrieval::{extract_section, segment};
use docstage_session::StagingSession;
use tempfile::TempDir;

const GUIDE: &str = "\
# Intro
Welcome to the guide.

## Setup
Install the tool.

### Linux
Use the package manager.

## Usage
Run the tool against a file.

#### Flags
--verbose prints more.

# Appendix
Nothing else to see.
";

fn write_fixture(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("fixture should be writable");
    path
}

fn squash(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

fn long_document() -> String {
    let mut text = String::from("Preamble before any heading.\n\n");
    for section in 0..12 {
        text.push_str(&format!("## Section {section}\n\n"));
        for paragraph in 0..6 {
            text.push_str(&format!(
                "Paragraph {paragraph} of section {section} talks about chunking at length.\n\n"
            ));
        }
        text.push_str("#### Footnote\nsmall print\n\n");
    }
    text
}

#[test]
fn chunks_cover_the_document_in_order() {
    let text = long_document();
    let chunks = segment(&text, 300);

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|chunk| !chunk.is_empty() && chunk.trim() == chunk));
    assert_eq!(squash(&chunks.join("\n")), squash(&text));

    let mut cursor = 0;
    for chunk in &chunks {
        let found = text[cursor..]
            .find(chunk.as_str())
            .expect("chunk should appear after the previous one");
        cursor += found + chunk.len();
    }
}

#[test]
fn chunks_respect_size_with_slack() {
    let text = long_document();
    let size = 150;

    for chunk in segment(&text, size) {
        let len = chunk.chars().count();
        let single_paragraph = !chunk.contains("\n\n");
        assert!(
            len * 2 <= size * 3 || single_paragraph,
            "chunk of {len} chars exceeds slack: {chunk:?}"
        );
    }
}

#[test]
fn scenario_sizes() {
    let text = "# A\nfoo\n## B\nbar\n# C\nbaz";
    assert_eq!(segment(text, 1000), vec![text]);
    assert_eq!(segment(text, 5), vec!["# A\nfoo", "## B\nbar", "# C\nbaz"]);
}

#[test]
fn extraction_boundaries() {
    let setup = extract_section(GUIDE, "Setup").expect("setup should be found");
    assert!(setup.starts_with("## Setup"));
    assert!(setup.contains("### Linux"));
    assert!(setup.ends_with("Use the package manager."));

    let intro = extract_section(GUIDE, "Intro").expect("intro should be found");
    assert!(intro.starts_with("# Intro"));
    assert!(intro.contains("## Usage"));
    assert!(intro.contains("#### Flags"));
    assert!(intro.ends_with("--verbose prints more."));

    assert_eq!(extract_section(GUIDE, "Changelog"), None);
}

#[test]
fn reloading_replaces_content() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_fixture(&dir, "guide.md", GUIDE);

    let mut session = StagingSession::default();
    let first = session.load(&path)?;
    let second = session.load(&path)?;
    assert_eq!(first, second);
    assert_eq!(session.store().len(), 1);

    fs::write(&path, "# Replaced\nnew body\n")?;
    let third = session.load(&path)?;
    assert_eq!(third.word_count, 4);
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.headings("guide.md")?, vec!["Replaced"]);
    assert!(session.search("Welcome", None)?.is_empty());
    Ok(())
}

#[test]
fn session_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_fixture(&dir, "guide.md", GUIDE);
    write_fixture(&dir, "notes.txt", "tool notes: the TOOL is fine\n");

    let mut session = StagingSession::new(StagingConfig {
        chunk_size: 80,
        context_radius: 5,
        ..StagingConfig::default()
    });
    let loaded = session.load_dir(dir.path())?;
    assert_eq!(loaded.len(), 2);

    assert_eq!(
        session.headings("guide.md")?,
        vec![
            "Intro",
            "  Setup",
            "    Linux",
            "  Usage",
            "      Flags",
            "Appendix"
        ]
    );

    let chunks = session.chunk("guide.md", None)?;
    assert!(chunks.len() > 1);
    assert!(chunks[0].starts_with("# Intro"));

    let hits = session.search("tool", None)?;
    let per_doc = |name: &str| hits.iter().filter(|hit| hit.document == name).count();
    assert_eq!(per_doc("guide.md"), 2);
    assert_eq!(per_doc("notes.txt"), 2);
    assert!(hits
        .iter()
        .all(|hit| hit.context.to_lowercase().contains("tool")));

    let section = session.extract("guide.md", "usage")?;
    assert!(section.starts_with("## Usage"));
    assert!(!section.contains("Appendix"));

    let missing = session.extract("guide.md", "Changelog").unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::SectionNotFound);
    let unloaded = session.extract("other.md", "Intro").unwrap_err();
    assert_eq!(unloaded.kind(), ErrorKind::NotFound);

    let stats = session.stats();
    assert_eq!(stats.documents_loaded, 2);
    assert_eq!(stats.section_misses, 1);
    Ok(())
}

#[test]
fn missing_source_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = StagingSession::default();

    let err = session.load(dir.path().join("nope.md")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().starts_with("File not found: "));
    assert_eq!(session.list(), "No documents loaded.");
}
