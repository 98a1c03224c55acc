use docstage_core::{scan_headings, Heading};

/// Finds the first heading (levels 1-4) whose title contains `fragment`, ignoring case.
pub fn find_heading(text: &str, fragment: &str) -> Option<Heading> {
    let needle = fragment.to_lowercase();
    scan_headings(text)
        .into_iter()
        .find(|heading| heading.title.to_lowercase().contains(&needle))
}

/// Returns the trimmed section under the first heading matching `fragment`.
///
/// The section runs from the heading line up to the next heading of the same
/// or a shallower level; deeper headings stay inside it. `None` means no
/// heading matched.
pub fn extract_section<'a>(text: &'a str, fragment: &str) -> Option<&'a str> {
    find_heading(text, fragment).map(|heading| text[heading.start..heading.end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: &str = "# Intro\nWelcome.\n\n## Setup\nInstall it.\n### Linux\napt\n## Usage\nRun it.\n# Appendix\nNotes.\n";

    #[test]
    fn sibling_heading_closes_section() {
        assert_eq!(
            extract_section(GUIDE, "Setup"),
            Some("## Setup\nInstall it.\n### Linux\napt")
        );
    }

    #[test]
    fn parent_section_keeps_nested_headings() {
        let intro = extract_section(GUIDE, "intro").unwrap();
        assert!(intro.starts_with("# Intro"));
        assert!(intro.contains("## Setup"));
        assert!(intro.ends_with("Run it."));
        assert!(!intro.contains("Appendix"));
    }

    #[test]
    fn last_section_runs_to_end() {
        assert_eq!(extract_section(GUIDE, "APPEND"), Some("# Appendix\nNotes."));
    }

    #[test]
    fn missing_heading_differs_from_bare_heading() {
        let text = "# Empty\n# Next\nbody";
        assert_eq!(extract_section(text, "empty"), Some("# Empty"));
        assert_eq!(extract_section(text, "Missing"), None);
        assert_eq!(extract_section("no headings here", ""), None);
    }

    #[test]
    fn first_match_wins_and_level_four_is_searchable() {
        let text = "# Notes one\na\n#### Notes deep\nb\n# Notes two\nc";
        assert_eq!(
            find_heading(text, "notes").map(|heading| heading.title),
            Some("Notes one".to_string())
        );
        assert_eq!(extract_section(text, "deep"), Some("#### Notes deep\nb"));
    }

    #[test]
    fn title_less_marker_ends_a_section() {
        let text = "## Setup\nx\n##\ny";
        assert_eq!(extract_section(text, "setup"), Some("## Setup\nx"));

        let deeper = "## Setup\nx\n###\ny";
        assert_eq!(extract_section(deeper, "setup"), Some(deeper));
    }

    #[test]
    fn body_text_is_not_a_title() {
        let text = "# Alpha\nmentions Setup in prose\n# Beta\n";
        assert_eq!(extract_section(text, "setup"), None);
    }
}
