use docstage_core::{Document, SearchMatch, StagingError, StagingResult};
use regex::{Regex, RegexBuilder};

/// Case-insensitive literal search across `documents`, in the order given.
///
/// Matches inside a document are reported left to right, overlapping ones
/// included. Offsets count characters from the start of the document, the
/// same unit `peek` takes. Each context spans up to `radius` characters on either side of
/// the match. An empty query matches nothing.
pub fn search<'a>(
    query: &str,
    documents: impl IntoIterator<Item = &'a Document>,
    radius: usize,
) -> StagingResult<Vec<SearchMatch>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = literal_pattern(query)?;
    let mut hits = Vec::new();

    for document in documents {
        let text = document.text.as_str();
        let mut at = 0;
        let mut counted_bytes = 0;
        let mut counted_chars = 0;

        while let Some(found) = pattern.find_at(text, at) {
            counted_chars += text[counted_bytes..found.start()].chars().count();
            counted_bytes = found.start();

            hits.push(SearchMatch {
                document: document.name.clone(),
                offset: counted_chars,
                context: context_window(text, found.start(), found.end(), radius).to_string(),
            });

            let step = text[found.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            at = found.start() + step;
            if at > text.len() {
                break;
            }
        }
    }

    Ok(hits)
}

fn literal_pattern(query: &str) -> StagingResult<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|err| StagingError::InvalidQuery(err.to_string()))
}

/// Slice of `text` covering `start..end` widened by `radius` characters each way.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(idx, _)| idx);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(idx, _)| end + idx);

    &text[from..to]
}
