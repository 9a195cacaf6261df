//! Recover raw source code from a model response.
//!
//! Models are asked not to fence their output but often do anyway. The first
//! fenced block wins; anything outside it (prose, further blocks) is dropped.

const FENCE: &str = "```";

/// Extract the first fenced code block, or return the trimmed response.
///
/// An opening fence is three backticks anywhere in the text, followed by an
/// optional language tag and a line break. The block closes at the next line
/// that starts with three backticks in its first column, so indented fences
/// inside the code (docstring examples) are kept. Without a closing line the
/// response is not treated as fenced. Never fails.
pub fn clean_response(raw: &str) -> String {
    first_fenced_block(raw).unwrap_or(raw).trim().to_string()
}

fn first_fenced_block(raw: &str) -> Option<&str> {
    let body_start = raw
        .match_indices(FENCE)
        .find_map(|(at, _)| opening_fence_end(raw, at))?;

    let mut offset = body_start;
    for line in raw.get(body_start..)?.split_inclusive('\n') {
        if line.starts_with(FENCE) {
            return raw.get(body_start..offset);
        }
        offset += line.len();
    }
    None
}

/// Byte offset just past the line break of a fence opened at `at`
fn opening_fence_end(raw: &str, at: usize) -> Option<usize> {
    let rest = raw.get(at + FENCE.len()..)?;
    let newline = rest.find('\n')?;
    let tag = rest.get(..newline)?.trim_end_matches('\r');
    tag.chars()
        .all(is_tag_char)
        .then_some(at + FENCE.len() + newline + 1)
}

// "python", "c++", "objective-c", "c#", "py3.12"
fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.' | '#')
}
