use anyhow::Result;
use docstage_core::SearchMatch;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ChunkView<'a> {
    sequence: usize,
    char_count: usize,
    text: &'a str,
}

pub fn chunks_json(chunks: &[String]) -> Result<String> {
    let views = chunks
        .iter()
        .enumerate()
        .map(|(sequence, text)| ChunkView {
            sequence,
            char_count: text.chars().count(),
            text,
        })
        .collect::<Vec<_>>();

    Ok(serde_json::to_string_pretty(&views)?)
}

pub fn matches_json(matches: &[SearchMatch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(matches)?)
}
