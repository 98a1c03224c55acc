use once_cell::sync::Lazy;
use regex::Regex;

// Level 4 headings never start a section here, unlike heading listing and extraction.
static SECTION_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,3} ").expect("valid section break regex"));

const SECTION_SEPARATOR: &str = "\n";
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits `text` into trimmed chunks of roughly `size` characters.
///
/// Sections delimited by level 1-3 headings are packed greedily. Any packed
/// chunk longer than `size * 1.5` is packed again from its blank-line
/// paragraphs. A single paragraph larger than that is emitted as is.
pub fn segment(text: &str, size: usize) -> Vec<String> {
    let packed = pack(split_sections(text), size, SECTION_SEPARATOR);

    let mut chunks = Vec::with_capacity(packed.len());
    for chunk in packed {
        if exceeds_slack(&chunk, size) {
            chunks.extend(pack(chunk.split(PARAGRAPH_SEPARATOR), size, PARAGRAPH_SEPARATOR));
        } else {
            chunks.push(chunk);
        }
    }

    chunks
}

/// Splits before every line opening with `#`, `##` or `###` and a space.
/// The newline ahead of each such line is dropped.
pub fn split_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut section_start = 0;

    for found in SECTION_BREAK.find_iter(text) {
        let at = found.start();
        if at == 0 {
            continue;
        }

        // A multi-line `^` past offset 0 always follows a '\n'.
        sections.push(&text[section_start..at - 1]);
        section_start = at;
    }

    sections.push(&text[section_start..]);
    sections
}

fn pack<'a>(pieces: impl IntoIterator<Item = &'a str>, size: usize, separator: &str) -> Vec<String> {
    let separator_len = separator.chars().count();
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in pieces {
        let piece_len = piece.chars().count();

        if current_len + piece_len > size && !current.is_empty() {
            flush(&mut chunks, &current);
            current.clear();
            current.push_str(piece);
            current_len = piece_len;
            continue;
        }

        if !current.is_empty() {
            current.push_str(separator);
            current_len += separator_len;
        }
        current.push_str(piece);
        current_len += piece_len;
    }

    flush(&mut chunks, &current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn exceeds_slack(chunk: &str, size: usize) -> bool {
    // len > size * 1.5 without floats
    chunk.chars().count().saturating_mul(2) > size.saturating_mul(3)
}
