mod chunking;
mod search;
mod section;

pub use chunking::{segment, split_sections};
pub use search::{context_window, search};
pub use section::{extract_section, find_heading};

/// Heading titles of levels 1-4, indented two spaces per level below the first.
pub fn heading_outline(text: &str) -> Vec<String> {
    docstage_core::scan_headings(text)
        .iter()
        .map(docstage_core::Heading::indented_title)
        .collect()
}
