//! Flattening of the alignment `<pre>` block into a sequence of markup events.
//!
//! Only three things matter inside the block: text runs, `<br>` line breaks, and
//! tags that should not be there. `<span>` wrappers are transparent, so their
//! text flows into the surrounding line. Any other element is reported once as
//! [`MarkupEvent::UnexpectedTag`] and its text content is dropped; `<br>` tags
//! nested inside such an element still break lines.

use std::borrow::Cow;

use crate::parsing::ParseError;

/// Elements that never have a closing tag
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// Decoded text, whitespace untouched
    Text(String),
    /// A `<br>` line break
    Break,
    /// Start tag of an element that is neither `<br>` nor `<span>`
    UnexpectedTag(String),
}

/// Return the content between the first `<pre ...>` start tag and its `</pre>`.
///
/// A missing end tag runs the block to the end of the document.
///
/// # Errors
///
/// Returns `ParseError::MissingPreformattedBlock` if the document has no `<pre>` tag.
pub fn preformatted_block(document: &str) -> Result<&str, ParseError> {
    // ASCII lowercasing keeps byte offsets identical to `document`
    let lower = document.to_ascii_lowercase();

    let mut search_from = 0;
    let content_start = loop {
        let open = lower[search_from..]
            .find("<pre")
            .map(|i| i + search_from)
            .ok_or(ParseError::MissingPreformattedBlock)?;
        let after_name = open + "<pre".len();

        // Reject tags that merely start with "pre", such as <prefix>
        match lower[after_name..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {
                let close = lower[after_name..]
                    .find('>')
                    .ok_or(ParseError::MissingPreformattedBlock)?;
                break after_name + close + 1;
            }
            _ => search_from = after_name,
        }
    };

    let content_end = lower[content_start..]
        .find("</pre")
        .map_or(document.len(), |i| i + content_start);

    Ok(&document[content_start..content_end])
}

/// Iterator over the markup events of a `<pre>` block body
pub struct MarkupEvents<'a> {
    rest: &'a str,
    /// Unexpected elements whose text is currently being dropped
    suppressed: Vec<String>,
}

impl<'a> MarkupEvents<'a> {
    #[must_use]
    pub fn new(block: &'a str) -> Self {
        Self {
            rest: block,
            suppressed: Vec::new(),
        }
    }

    fn take_text(&mut self) -> &'a str {
        let end = self.rest.find('<').unwrap_or(self.rest.len());
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        text
    }

    /// Consume one tag starting at `<`. Returns the event it produces, if any.
    fn take_tag(&mut self) -> Option<MarkupEvent> {
        if let Some(comment) = self.rest.strip_prefix("<!--") {
            self.rest = comment
                .find("-->")
                .map_or("", |end| &comment[end + "-->".len()..]);
            return None;
        }

        let Some(end) = tag_end(self.rest) else {
            // A stray '<' with no closing '>' is plain text
            let text = std::mem::take(&mut self.rest);
            return self.text_event(text);
        };

        let tag = &self.rest[1..end];
        self.rest = &self.rest[end + 1..];

        let closing = tag.starts_with('/');
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        // Doctype, processing instructions, or garbage like "< "
        if name.is_empty() {
            return None;
        }

        match (name.as_str(), closing) {
            ("br", false) => Some(MarkupEvent::Break),
            ("br" | "span", _) => None,
            (_, true) => {
                if let Some(pos) = self.suppressed.iter().rposition(|open| *open == name) {
                    self.suppressed.truncate(pos);
                }
                None
            }
            (_, false) => {
                let self_closing = tag.trim_end().ends_with('/');
                if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    self.suppressed.push(name.clone());
                }
                Some(MarkupEvent::UnexpectedTag(name.clone()))
            }
        }
    }

    fn text_event(&self, text: &str) -> Option<MarkupEvent> {
        if text.is_empty() || !self.suppressed.is_empty() {
            return None;
        }
        Some(MarkupEvent::Text(decode_entities(text).into_owned()))
    }
}

/// Byte offset of the `>` closing the tag that starts `s`, skipping quoted
/// attribute values
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    let mut after_equals = false;
    for (i, c) in s.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '>' => return Some(i),
                '"' | '\'' if after_equals => quote = Some(c),
                '=' => after_equals = true,
                c if c.is_whitespace() => {}
                _ => after_equals = false,
            },
        }
    }
    None
}

impl Iterator for MarkupEvents<'_> {
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let event = if self.rest.starts_with('<') {
                self.take_tag()
            } else {
                let text = self.take_text();
                self.text_event(text)
            };
            if event.is_some() {
                return event;
            }
        }
        None
    }
}

/// Decode HTML character references.
///
/// `&nbsp;` becomes U+00A0. Unknown or unterminated references are left as-is.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp..];

        // Longest reference we care about is "&#x10FFFF;"
        let reference = rest
            .char_indices()
            .take(11)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| decode_reference(&rest[1..semi]).map(|c| (semi, c)));

        match reference {
            Some((semi, c)) => {
                decoded.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some('\u{a0}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
