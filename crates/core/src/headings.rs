use crate::models::Heading;

pub const MAX_HEADING_LEVEL: u8 = 4;

/// Parses a single line (without its newline) as a heading.
///
/// A heading is a run of 1-4 `#` followed by whitespace and a non-empty title.
/// Longer runs such as `#####` are plain text.
pub fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let marker_len = line.bytes().take_while(|byte| *byte == b'#').count();
    if marker_len == 0 || marker_len > usize::from(MAX_HEADING_LEVEL) {
        return None;
    }

    let rest = &line[marker_len..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let title = rest.trim();
    if title.is_empty() {
        return None;
    }

    Some((marker_len as u8, title))
}

/// Level of a title-less marker line such as `##` or `## `.
///
/// These are not headings, but they still close sections of the same or a
/// deeper level. A bare run only counts when a newline follows it.
fn bare_marker_level(raw_line: &str) -> Option<u8> {
    let marker_len = raw_line.bytes().take_while(|byte| *byte == b'#').count();
    if marker_len == 0 || marker_len > usize::from(MAX_HEADING_LEVEL) {
        return None;
    }

    let rest = &raw_line[marker_len..];
    if rest.starts_with(char::is_whitespace) && rest.trim().is_empty() {
        Some(marker_len as u8)
    } else {
        None
    }
}

/// Scans `text` for headings of levels 1-4 in document order.
///
/// Each heading's `end` is the start of the next heading, or title-less
/// marker line, of the same or a shallower level, or `text.len()`.
pub fn scan_headings(text: &str) -> Vec<Heading> {
    let mut headings: Vec<Heading> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut offset = 0;

    for raw_line in text.split_inclusive('\n') {
        let start = offset;
        offset += raw_line.len();

        let line = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let Some((level, title)) = parse_heading_line(line) else {
            if let Some(level) = bare_marker_level(raw_line) {
                close_open(&mut headings, &mut open, level, start);
            }
            continue;
        };

        close_open(&mut headings, &mut open, level, start);
        open.push(headings.len());
        headings.push(Heading {
            level,
            title: title.to_string(),
            start,
            end: text.len(),
        });
    }

    headings
}

fn close_open(headings: &mut [Heading], open: &mut Vec<usize>, level: u8, at: usize) {
    while let Some(&idx) = open.last() {
        if headings[idx].level < level {
            break;
        }
        headings[idx].end = at;
        open.pop();
    }
}
