use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub source_path: String,
    pub text: String,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            text: text.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            name: self.name.clone(),
            char_count: self.char_count(),
            word_count: self.word_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub char_count: usize,
    pub word_count: usize,
}

impl DocumentSummary {
    /// One line of the document listing, e.g. `  guide.md: 12,480 chars, 1,903 words`.
    pub fn listing_line(&self) -> String {
        format!(
            "  {}: {} chars, {} words",
            self.name,
            group_thousands(self.char_count),
            group_thousands(self.word_count)
        )
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} chars, {} words",
            self.name, self.char_count, self.word_count
        )
    }
}

/// A heading line of levels 1-4. Offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub title: String,
    pub start: usize,
    pub end: usize,
}

impl Heading {
    pub fn indented_title(&self) -> String {
        let depth = usize::from(self.level.saturating_sub(1));
        format!("{}{}", "  ".repeat(depth), self.title)
    }
}

/// A search hit. `offset` is a character offset, unlike `Heading` offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub document: String,
    pub offset: usize,
    pub context: String,
}

pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_count_chars_and_words() {
        let doc = Document::new("notes.md", "notes.md", "# Título\n\nuno dos  tres\n");
        assert_eq!(doc.char_count(), 24);
        assert_eq!(doc.word_count(), 5);
    }

    #[test]
    fn listing_line_groups_thousands() {
        let summary = DocumentSummary {
            name: "big.md".to_string(),
            char_count: 1_234_567,
            word_count: 999,
        };
        assert_eq!(summary.listing_line(), "  big.md: 1,234,567 chars, 999 words");
        assert_eq!(summary.to_string(), "big.md: 1234567 chars, 999 words");
    }

    #[test]
    fn indentation_follows_level() {
        let heading = Heading {
            level: 3,
            title: "Deep".to_string(),
            start: 0,
            end: 0,
        };
        assert_eq!(heading.indented_title(), "    Deep");
    }

    #[test]
    fn search_match_serializes_flat() {
        let hit = SearchMatch {
            document: "a.md".to_string(),
            offset: 4,
            context: "foo".to_string(),
        };
        let value = serde_json::to_value(&hit).unwrap();
        assert_eq!(value["document"], "a.md");
        assert_eq!(value["offset"], 4);
    }
}
