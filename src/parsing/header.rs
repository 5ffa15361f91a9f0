//! Column label inference for block header lines.
//!
//! Header lines carry no delimiters that line up with the body columns. Each
//! label is printed left-aligned above its column but may be wider than the
//! column itself, in which case it spills into the space of the following
//! columns and shifts every later label to the right. The alignment walks the
//! body tokens left to right and carries that shift forward as a "push".

use crate::parsing::ParseError;

/// Derive one header label per body token.
///
/// `body_tokens` must be the whitespace-separated tokens of `first_body_line`,
/// in order. Offsets are counted in characters. Windows reaching past the end
/// of `header_line` are clamped, producing short or empty labels.
///
/// # Errors
///
/// Returns `ParseError::TokenNotFound` if a token does not occur in
/// `first_body_line` at or after the end of the previous token.
pub fn align_header(
    header_line: &str,
    first_body_line: &str,
    body_tokens: &[&str],
) -> Result<Vec<String>, ParseError> {
    let header: Vec<char> = header_line.chars().collect();
    let body: Vec<char> = first_body_line.chars().collect();

    let mut labels = Vec::with_capacity(body_tokens.len());
    let mut push = 0;
    let mut search_from = 0;

    for token in body_tokens {
        let needle: Vec<char> = token.chars().collect();
        let start = find_from(&body, &needle, search_from).ok_or_else(|| {
            ParseError::TokenNotFound {
                token: (*token).to_string(),
                from: search_from,
            }
        })?;
        search_from = start + needle.len();
        let naive_end = search_from - 1;

        let window_start = push + start;
        let provisional_end = push + naive_end;
        let mut window_end = provisional_end;
        while window_end + 1 < header.len() && !header[window_end + 1].is_whitespace() {
            window_end += 1;
        }
        push += window_end - provisional_end;

        labels.push(label_at(&header, window_start, window_end));
    }

    Ok(labels)
}

/// Trimmed text of `header[start..=end]`, clamped to the header length
fn label_at(header: &[char], start: usize, end: usize) -> String {
    if start >= header.len() {
        return String::new();
    }
    let end = end.min(header.len() - 1);
    header[start..=end]
        .iter()
        .collect::<String>()
        .trim()
        .to_string()
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}
